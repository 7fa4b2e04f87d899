use crate::rag::ChatPipeline;

/// Shared application state handed to the axum handlers.
///
/// The pipeline's clients live for the whole process; they are built once in
/// `main` and injected here, never reached through module-level globals.
pub struct AppState {
    pub pipeline: ChatPipeline,
}
