use askama::Template;
use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, Response as HttpResponse, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sitedocs_model::{sanitize_filename, PROJECT_INFO_FILE};
use sitedocs_store::StoreError;

use crate::templates::{
    CreateProjectTemplate, IndexTemplate, ListProjectsTemplate, ProjectDetailsTemplate,
};
use crate::AppState;

/// Flash notice carried across a redirect as a query parameter. The original
/// message survives one hop and is rendered by the target page.
#[derive(Deserialize)]
pub(crate) struct NoticeQuery {
    #[serde(default)]
    notice: Option<String>,
}

impl NoticeQuery {
    fn take(self) -> String {
        self.notice.unwrap_or_default()
    }
}

#[derive(Deserialize)]
pub(crate) struct CreateProjectForm {
    project_name: String,
}

pub(crate) async fn index(Query(query): Query<NoticeQuery>) -> Response {
    render(&IndexTemplate {
        notice: query.take(),
    })
}

pub(crate) async fn create_project_form(Query(query): Query<NoticeQuery>) -> Response {
    render(&CreateProjectTemplate {
        notice: query.take(),
    })
}

pub(crate) async fn create_project_submit(
    State(state): State<AppState>,
    Form(form): Form<CreateProjectForm>,
) -> Response {
    match state.store.create_project(&form.project_name) {
        Ok(_) => redirect_with_notice(
            "/list_projects",
            &format!("Project '{}' created successfully.", form.project_name),
        ),
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    match state.store.list_projects() {
        Ok(projects) => render(&ListProjectsTemplate {
            projects,
            notice: query.take(),
        }),
        Err(StoreError::BaseDirMissing(_)) => {
            redirect_with_notice("/", "Project directory does not exist.")
        }
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn show_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    let info = match state.store.load_project(&project_id) {
        Ok(info) => info,
        Err(StoreError::ProjectNotFound(_)) => {
            return redirect_with_notice(
                "/list_projects",
                "Project not found or project information file is missing.",
            )
        }
        Err(err) => return internal_error(err),
    };

    match state.store.document_listing(&info) {
        Ok(folders) => render(&ProjectDetailsTemplate {
            info,
            folders,
            notice: query.take(),
        }),
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn upload_document(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let detail_page = format!("/project/{project_id}");

    let mut folder_type: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                log::warn!("malformed multipart upload for {project_id}: {err}");
                return redirect_with_notice(&detail_page, "Malformed upload request.");
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("folder_type") => match field.text().await {
                Ok(value) => folder_type = Some(value),
                Err(err) => {
                    log::warn!("unreadable folder_type field for {project_id}: {err}");
                    return redirect_with_notice(&detail_page, "Malformed upload request.");
                }
            },
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((filename, bytes.to_vec())),
                    Err(err) => {
                        log::warn!("unreadable file field for {project_id}: {err}");
                        return redirect_with_notice(&detail_page, "Malformed upload request.");
                    }
                }
            }
            _ => {}
        }
    }

    let Some((raw_filename, bytes)) = file else {
        return redirect_with_notice(&detail_page, "No file part");
    };
    if raw_filename.is_empty() {
        return redirect_with_notice(&detail_page, "No selected file");
    }
    let folder_type = folder_type.unwrap_or_default();

    match state
        .store
        .save_document(&project_id, &folder_type, &raw_filename, &bytes)
    {
        Ok(stored) => redirect_with_notice(
            &detail_page,
            &format!("File '{stored}' uploaded successfully to '{folder_type}'."),
        ),
        Err(StoreError::DisallowedExtension(_)) => {
            redirect_with_notice(&detail_page, "File type not allowed.")
        }
        Err(StoreError::FolderNotFound(_)) => {
            redirect_with_notice(&detail_page, "Invalid folder type selected.")
        }
        Err(StoreError::InvalidFilename(_)) => {
            redirect_with_notice(&detail_page, "No selected file")
        }
        Err(StoreError::ProjectNotFound(_)) => redirect_with_notice(
            "/list_projects",
            "Project not found or project information file is missing.",
        ),
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn download_document(
    State(state): State<AppState>,
    Path((project_id, folder_type, filename)): Path<(String, String, String)>,
) -> Response {
    match state.store.document_path(&project_id, &folder_type, &filename) {
        Ok(path) => {
            serve_attachment(&path, &sanitize_filename(&filename), "application/octet-stream")
                .await
        }
        Err(StoreError::DocumentNotFound(_)) => {
            redirect_with_notice(&format!("/project/{project_id}"), "Document not found.")
        }
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn download_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Response {
    match state.store.metadata_path(&project_id) {
        Ok(path) => serve_attachment(&path, PROJECT_INFO_FILE, "application/json").await,
        Err(StoreError::ProjectNotFound(_)) => {
            redirect_with_notice("/list_projects", "Project data not found.")
        }
        Err(err) => internal_error(err),
    }
}

fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => internal_error(err),
    }
}

fn redirect_with_notice(target: &str, notice: &str) -> Response {
    let location = format!("{target}?notice={}", urlencoding::encode(notice));
    Redirect::to(&location).into_response()
}

fn internal_error(err: impl std::fmt::Display) -> Response {
    log::error!("request failed: {err}");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

async fn serve_attachment(
    path: &std::path::Path,
    download_name: &str,
    content_type: &str,
) -> Response {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) => return internal_error(err),
    };

    HttpResponse::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{download_name}\""),
        )
        .body(Body::from(bytes))
        .expect("valid HTTP response")
}
