use askama::Template;
use sitedocs_model::ProjectInfo;
use sitedocs_store::FolderListing;

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub notice: String,
}

#[derive(Template)]
#[template(path = "create_project.html")]
pub(crate) struct CreateProjectTemplate {
    pub notice: String,
}

#[derive(Template)]
#[template(path = "list_projects.html")]
pub(crate) struct ListProjectsTemplate {
    pub projects: Vec<String>,
    pub notice: String,
}

#[derive(Template)]
#[template(path = "project_details.html")]
pub(crate) struct ProjectDetailsTemplate {
    pub info: ProjectInfo,
    pub folders: Vec<FolderListing>,
    pub notice: String,
}
