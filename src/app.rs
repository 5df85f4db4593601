use crate::assistant::AssistantBridge;
use crate::event::{AppEvent, EventSender};
use crate::preview;
use crate::state::{AppState, CatalogStatus};
use crate::theme::Theme;
use crate::ui::action::{Action, Effect};
use crate::ui::panels::{self, Direction};
use crate::ui::view;
use eframe::egui::{self, RichText, ScrollArea};
use std::sync::mpsc::{Receiver, TryRecvError};
use tokio::runtime::Handle;
use tracing::debug;

pub struct RoutineApp {
    rx: Receiver<AppEvent>,
    state: AppState,
    bridge: AssistantBridge,
    events: EventSender,
    runtime_handle: Handle,
    theme: Theme,
    direction: Direction,
    chat_input: String,
}

impl RoutineApp {
    pub fn new(
        rx: Receiver<AppEvent>,
        state: AppState,
        bridge: AssistantBridge,
        events: EventSender,
        runtime_handle: Handle,
        theme: Theme,
        rtl: bool,
    ) -> Self {
        Self {
            rx,
            state,
            bridge,
            events,
            runtime_handle,
            theme,
            direction: Direction { rtl },
            chat_input: String::new(),
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.state.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.state.log_diagnostic("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn run_actions(&mut self, actions: Vec<Action>) {
        for action in actions {
            debug!(action = %action.to_log_line(), "dispatching");
            match self.state.dispatch(action) {
                Some(Effect::SendTurn(turn)) => self.bridge.send(turn),
                Some(Effect::PickImage) => {
                    preview::pick_image(&self.runtime_handle, self.events.clone())
                }
                None => {}
            }
        }
    }

    fn render_top_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.with_layout(self.direction.row(), |ui| {
                ui.heading("Routine Studio");
                ui.separator();
                let (label, color) = match self.state.catalog_status() {
                    CatalogStatus::Loading => ("Loading products...".to_string(), self.theme.text_muted),
                    CatalogStatus::Ready => (
                        format!("{} products", self.state.catalog().products().len()),
                        self.theme.text_muted,
                    ),
                    CatalogStatus::Failed(reason) => {
                        (format!("Could not load products: {reason}"), self.theme.danger)
                    }
                };
                ui.label(RichText::new(label).color(color));
            });
        });
    }

    fn render_left_panel(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let mut emit = |action: Action| actions.push(action);
        egui::SidePanel::new(self.direction.leading_side(), "selection_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Selected Products");
                ui.separator();
                let selection = view::selection_view(self.state.selection());
                ScrollArea::vertical()
                    .id_salt("selected_products")
                    .show(ui, |ui| {
                        panels::render_selection(ui, &self.theme, self.direction, &selection, &mut emit);
                    });

                ui.separator();
                if ui.add(self.theme.primary_button("Generate Routine")).clicked() {
                    emit(Action::GenerateRoutine);
                }
            });
    }

    fn render_right_panel(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let theme = &self.theme;
        let direction = self.direction;
        let state = &self.state;
        let chat_input = &mut self.chat_input;
        let mut emit = |action: Action| actions.push(action);

        egui::SidePanel::new(direction.trailing_side(), "assistant_panel")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.heading("Let's Build Your Routine");
                ui.separator();

                let lines = view::chat_lines(state.conversation().display());
                let chat_height = (ui.available_height() - 360.0).max(160.0);
                panels::render_chat(ui, theme, direction, &lines, chat_height);

                let mut send_now = false;
                ui.with_layout(direction.row(), |ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut *chat_input)
                            .desired_width(260.0)
                            .hint_text("Ask me about products or routines..."),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        send_now = true;
                    }
                    send_now |= ui
                        .add_enabled(!chat_input.trim().is_empty(), egui::Button::new("Send"))
                        .clicked();
                });
                if send_now && !chat_input.trim().is_empty() {
                    emit(Action::SendFollowUp(std::mem::take(&mut *chat_input)));
                }

                ui.separator();
                ui.strong("Skin Quiz");
                let quiz = view::quiz_view(state.quiz());
                panels::render_quiz(ui, theme, direction, &quiz, &mut emit);

                ui.separator();
                ui.strong("Your Photo");
                panels::render_preview(ui, theme, direction, state.preview(), &mut emit);

                ui.separator();
                egui::CollapsingHeader::new("Diagnostics")
                    .default_open(false)
                    .show(ui, |ui| {
                        ScrollArea::vertical()
                            .id_salt("diagnostics_log")
                            .max_height(90.0)
                            .stick_to_bottom(true)
                            .show(ui, |ui| {
                                for entry in state.diagnostics() {
                                    ui.label(entry);
                                }
                            });
                    });
            });
    }

    fn render_center_panel(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let mut emit = |action: Action| actions.push(action);
        egui::CentralPanel::default().show(ctx, |ui| {
            let categories = self.state.catalog().categories();
            panels::render_filter_bar(
                ui,
                self.direction,
                &categories,
                self.state.category(),
                self.state.search(),
                &mut emit,
            );
            ui.separator();

            let visible = self.state.visible_products();
            let catalog = view::catalog_view(
                visible.as_deref(),
                self.state.selection(),
                self.state.expanded(),
            );
            ScrollArea::vertical()
                .id_salt("product_grid")
                .show(ui, |ui| {
                    panels::render_catalog(ui, &self.theme, self.direction, &catalog, &mut emit);
                });
        });
    }
}

impl eframe::App for RoutineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        let mut actions = Vec::new();
        self.render_top_bar(ctx);
        self.render_left_panel(ctx, &mut actions);
        self.render_right_panel(ctx, &mut actions);
        self.render_center_panel(ctx, &mut actions);

        if !actions.is_empty() {
            self.run_actions(actions);
            ctx.request_repaint();
        }
    }
}
