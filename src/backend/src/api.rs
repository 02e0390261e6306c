use crate::{
    controller_client::ControllerClient,
    http_client::handle_service_result,
    services::tracking::{ControllerReport, DetectionFrame, TrackingService},
};
use actix_web::{HttpResponse, Responder, web};
use anyhow::{Result, anyhow};
use log::{debug, info, warn};
use smart_fan_core::types::TrackingStatus;
use std::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};

pub const RESET_MESSAGE: &str = "Tracking system reset";

pub struct Api<Controller>
where
    Controller: ControllerClient,
{
    pub controller_client: Controller,
    pub tracker: Mutex<TrackingService>,
}

impl<Controller> Api<Controller>
where
    Controller: ControllerClient + Send + Sync + 'static,
{
    pub fn new(controller_client: Controller) -> Self {
        Api {
            controller_client,
            tracker: Mutex::new(TrackingService::new()),
        }
    }

    pub async fn coordinates(api: web::Data<Self>) -> impl Responder {
        let result = api.tracker().map(|tracker| tracker.status());
        handle_service_result(result, "coordinates")
    }

    pub async fn detections(
        body: web::Json<DetectionFrame>,
        api: web::Data<Self>,
    ) -> impl Responder {
        debug!(
            "detections() called: {} detections in {}x{} frame",
            body.detections.len(),
            body.frame_width,
            body.frame_height
        );

        let result = Self::track(&api, &body);
        handle_service_result(result, "detections")
    }

    pub async fn reset(api: web::Data<Self>) -> impl Responder {
        info!("reset() called");

        let result = api.tracker().map(|mut tracker| tracker.reset());
        let result = result.map(|report| {
            Self::forward(&api, report);
            RESET_MESSAGE.to_string()
        });

        handle_service_result(result, "reset")
    }

    pub async fn version() -> impl Responder {
        HttpResponse::Ok().body(env!("CARGO_PKG_VERSION"))
    }

    fn track(api: &web::Data<Self>, frame: &DetectionFrame) -> Result<TrackingStatus> {
        let (status, report) = {
            let mut tracker = api.tracker()?;
            let report = tracker.process_frame(frame, Instant::now());
            (tracker.status(), report)
        };

        if let Some(report) = report {
            Self::forward(api, report);
        }

        Ok(status)
    }

    fn tracker(&self) -> Result<MutexGuard<'_, TrackingService>> {
        self.tracker
            .lock()
            .map_err(|_| anyhow!("tracking state is poisoned"))
    }

    // Controller is contacted in the background; request handling never waits on it.
    fn forward(api: &web::Data<Self>, report: ControllerReport) {
        let api = api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.controller_client.send_report(report).await {
                warn!("failed to forward report to controller: {e:#}");
            }
        });
    }
}
