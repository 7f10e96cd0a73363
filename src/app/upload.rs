//! Upload prompt actions

use crate::model::Model;
use crate::services::upload::{expand_upload_inputs, UploadReport};
use crate::services::{ApiRequest, OverwriteReply};

use super::dictionary;

pub fn open_prompt(model: &mut Model) {
    if model.ui.uploading {
        model.show_toast("Upload already running".to_string());
        return;
    }
    model.ui.upload_prompt = Some(String::new());
}

/// Expand the prompt into files and hand them to the worker
pub fn submit_prompt(model: &mut Model) -> Vec<ApiRequest> {
    let Some(input) = model.ui.upload_prompt.take() else {
        return Vec::new();
    };

    match expand_upload_inputs(&input) {
        Ok(paths) => {
            model.ui.uploading = true;
            let label = if paths.len() == 1 {
                "Uploading 1 file".to_string()
            } else {
                format!("Uploading {} files", paths.len())
            };
            model.show_toast(label);
            vec![ApiRequest::UploadDictionaries { paths }]
        }
        Err(e) => {
            model.ui.show_alert("Upload", e.to_string());
            Vec::new()
        }
    }
}

/// The worker found an existing dictionary with the same name
pub fn request_overwrite(model: &mut Model, filename: String, reply: OverwriteReply) {
    model.ui.ask_overwrite(filename, reply);
}

/// Report the outcome and re-render the list once
pub fn handle_upload_finished(model: &mut Model, report: UploadReport) -> Vec<ApiRequest> {
    model.ui.uploading = false;
    if let Some((title, message)) = report.message() {
        model.ui.show_alert(title, message);
    }
    dictionary::refresh(model)
}
