use std::sync::mpsc;

use tokio::runtime::Handle;
use tracing::debug;

use crate::io::http::{GalleryClient, GalleryError, Rotation};
use crate::model::PhotoDetails;
use crate::ops::forms::Submission;

/// A finished background request
#[derive(Debug)]
pub enum JobResult {
    Rotated(Result<(), GalleryError>),
    Submitted {
        /// What was submitted, for the alert text ("Tag", "Grade", ...)
        what: &'static str,
        result: Result<(), GalleryError>,
    },
    Details {
        imgid: u32,
        result: Result<PhotoDetails, GalleryError>,
    },
}

/// Admin requests and detail reloads, run on the tokio runtime and
/// collected on the UI thread each tick.
pub struct Jobs {
    client: GalleryClient,
    runtime: Handle,
    tx: mpsc::Sender<JobResult>,
    rx: mpsc::Receiver<JobResult>,
}

impl Jobs {
    pub fn new(client: GalleryClient, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Jobs {
            client,
            runtime,
            tx,
            rx,
        }
    }

    pub fn client(&self) -> &GalleryClient {
        &self.client
    }

    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    pub fn rotate(&self, imgid: u32, rotation: Rotation) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.rotate(imgid, rotation).await;
            let _ = tx.send(JobResult::Rotated(result));
        });
    }

    pub fn submit(&self, imgid: u32, submission: Submission) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        debug!(imgid, ?submission, "submitting admin form");
        self.runtime.spawn(async move {
            let (what, result) = match submission {
                Submission::Attach { category, values } => (
                    category.title(),
                    client.attach(imgid, category, &values).await,
                ),
                Submission::Grade(grade) => ("Grade", client.grade(imgid, grade).await),
                Submission::Locate(pos) => ("Location", client.locate(imgid, pos).await),
            };
            let _ = tx.send(JobResult::Submitted { what, result });
        });
    }

    pub fn load_details(&self, imgid: u32) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.details(imgid).await;
            let _ = tx.send(JobResult::Details { imgid, result });
        });
    }

    pub fn poll(&self) -> Vec<JobResult> {
        let mut results = Vec::new();
        while let Ok(r) = self.rx.try_recv() {
            results.push(r);
        }
        results
    }
}

/// Alert text for a failed rotate request
pub fn rotate_alert(err: &GalleryError) -> String {
    match err {
        GalleryError::Timeout => "Rotating timed out".to_string(),
        GalleryError::Status { status } => format!("Rotating failed: {status}"),
        _ => "Rotating failed.".to_string(),
    }
}

/// Alert text for a failed admin form submission
pub fn submit_alert(what: &str, err: &GalleryError) -> String {
    match err {
        GalleryError::Status { status } => format!("{what} failed: {status}"),
        GalleryError::Timeout => format!("{what} timed out"),
        other => format!("{what} failed: {other}"),
    }
}
