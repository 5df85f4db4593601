use crate::assistant::PendingTurn;
use crate::catalog::Catalog;
use crate::error::{BridgeError, CatalogError, PreviewError};
use crate::preview::ImagePreview;
use eframe::egui;
use std::sync::mpsc;
use tracing::warn;

#[derive(Debug)]
pub enum AppEvent {
    CatalogLoaded(Result<Catalog, CatalogError>),
    AssistantReplied {
        turn: PendingTurn,
        result: Result<String, BridgeError>,
    },
    ImageRead(Result<ImagePreview, PreviewError>),
}

#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    ctx: egui::Context,
}

impl EventSender {
    pub fn new(tx: mpsc::Sender<AppEvent>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }

    pub fn send(&self, event: AppEvent) {
        if self.tx.send(event).is_err() {
            warn!("event channel closed, dropping event");
            return;
        }
        self.ctx.request_repaint();
    }
}
