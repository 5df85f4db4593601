use crate::preview::PreviewState;
use crate::theme::Theme;
use crate::ui::action::Action;
use crate::ui::view::{CardView, CatalogView, ChatLine, ChatLineKind, QuizView, SelectionView};
use eframe::egui::{self, panel::Side, Align, Layout, RichText, ScrollArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub rtl: bool,
}

impl Direction {
    pub fn column(&self) -> Layout {
        if self.rtl {
            Layout::top_down(Align::Max)
        } else {
            Layout::top_down(Align::Min)
        }
    }

    pub fn leading_side(&self) -> Side {
        if self.rtl {
            Side::Right
        } else {
            Side::Left
        }
    }

    pub fn trailing_side(&self) -> Side {
        if self.rtl {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn row(&self) -> Layout {
        if self.rtl {
            Layout::right_to_left(Align::Center)
        } else {
            Layout::left_to_right(Align::Center)
        }
    }
}

pub fn render_filter_bar(
    ui: &mut egui::Ui,
    direction: Direction,
    categories: &[String],
    category: Option<&str>,
    search: &str,
    emit: &mut dyn FnMut(Action),
) {
    ui.with_layout(direction.row(), |ui| {
        let mut chosen = category.map(str::to_string);
        egui::ComboBox::from_id_salt("category_filter")
            .selected_text(category.unwrap_or("Choose a category"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut chosen, None, "All categories");
                for option in categories {
                    ui.selectable_value(&mut chosen, Some(option.clone()), option);
                }
            });
        if chosen.as_deref() != category {
            emit(Action::SetCategory(chosen));
        }

        let mut term = search.to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut term)
                .desired_width(f32::INFINITY)
                .hint_text("Search products by name or keyword..."),
        );
        if response.changed() {
            emit(Action::SetSearch(term));
        }
    });
}

pub fn render_catalog(
    ui: &mut egui::Ui,
    theme: &Theme,
    direction: Direction,
    view: &CatalogView,
    emit: &mut dyn FnMut(Action),
) {
    let cards = match view {
        CatalogView::Placeholder(text) => {
            ui.with_layout(direction.column(), |ui| {
                ui.label(RichText::new(*text).color(theme.text_muted));
            });
            return;
        }
        CatalogView::Cards(cards) => cards,
    };

    ui.horizontal_wrapped(|ui| {
        for card in cards {
            ui.allocate_ui_with_layout(
                egui::vec2(theme.card_width, 0.0),
                direction.column(),
                |ui| {
                    render_card(ui, theme, direction, card, emit);
                },
            );
        }
    });
}

fn render_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    direction: Direction,
    card: &CardView,
    emit: &mut dyn FnMut(Action),
) -> egui::Response {
    theme
        .card_frame(card.selected)
        .show(ui, |ui| {
            ui.set_width(theme.card_width - 2.0 * theme.spacing_12);

            // Labels stay unselectable here so clicks on the text reach the header.
            let header = ui
                .with_layout(direction.column(), |ui| {
                    ui.style_mut().interaction.selectable_labels = false;
                    ui.add(
                        egui::Image::from_uri(card.image.as_str())
                            .max_size(egui::vec2(theme.thumbnail_size, theme.thumbnail_size)),
                    );
                    ui.add(egui::Label::new(RichText::new(&card.name).strong()).selectable(false));
                    ui.add(
                        egui::Label::new(RichText::new(&card.brand).color(theme.text_muted))
                            .selectable(false),
                    );
                })
                .response
                .interact(egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if header.clicked() {
                emit(card.on_click.clone());
            }

            if ui.button(card.toggle_label).clicked() {
                emit(card.on_toggle_description.clone());
            }
            if card.expanded {
                ui.label(RichText::new(&card.description).size(13.0));
            }
            header
        })
        .inner
}

pub fn render_selection(
    ui: &mut egui::Ui,
    theme: &Theme,
    direction: Direction,
    view: &SelectionView,
    emit: &mut dyn FnMut(Action),
) {
    if let Some(placeholder) = view.placeholder {
        ui.label(RichText::new(placeholder).color(theme.text_muted));
    }

    ui.horizontal_wrapped(|ui| {
        for chip in &view.chips {
            theme.chip_frame().show(ui, |ui| {
                ui.with_layout(direction.row(), |ui| {
                    ui.add(
                        egui::Image::from_uri(chip.image.as_str())
                            .max_size(egui::vec2(28.0, 28.0)),
                    );
                    ui.label(&chip.name);
                    if ui.small_button("✕").on_hover_text("Remove").clicked() {
                        emit(chip.on_remove.clone());
                    }
                });
            });
        }
    });

    if let Some(clear) = &view.clear {
        if ui.add(theme.danger_button("Clear All")).clicked() {
            emit(clear.clone());
        }
    }
}

pub fn render_quiz(
    ui: &mut egui::Ui,
    theme: &Theme,
    direction: Direction,
    view: &QuizView,
    emit: &mut dyn FnMut(Action),
) {
    ui.with_layout(direction.column(), |ui| match view {
        QuizView::NotStarted { start } => {
            ui.label("Not sure where to start? Answer eight quick questions.");
            if ui.add(theme.primary_button("Take the Skin Quiz")).clicked() {
                emit(start.clone());
            }
        }
        QuizView::Asking {
            step,
            total,
            prompt,
            options,
        } => {
            ui.label(
                RichText::new(format!("Question {step} of {total}"))
                    .color(theme.text_muted)
                    .small(),
            );
            ui.label(RichText::new(*prompt).strong());
            ui.horizontal_wrapped(|ui| {
                for option in options {
                    if ui.button(option.label).clicked() {
                        emit(option.on_pick.clone());
                    }
                }
            });
        }
        QuizView::Finished { restart } => {
            ui.label("Your quiz results are in the chat.");
            if ui.button("Retake Quiz").clicked() {
                emit(restart.clone());
            }
        }
    });
}

pub fn render_chat(
    ui: &mut egui::Ui,
    theme: &Theme,
    direction: Direction,
    lines: &[ChatLine],
    max_height: f32,
) {
    ScrollArea::vertical()
        .id_salt("chat_window")
        .max_height(max_height)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.with_layout(direction.column(), |ui| {
                for line in lines {
                    match line.kind {
                        ChatLineKind::Notice => {
                            ui.label(RichText::new(&line.text).color(theme.text_muted).italics());
                        }
                        ChatLineKind::User => {
                            theme.bubble_frame(theme.surface_2).show(ui, |ui| {
                                ui.label(RichText::new(&line.text).strong());
                            });
                        }
                        ChatLineKind::Assistant => {
                            theme.bubble_frame(theme.surface_1).show(ui, |ui| {
                                ui.label(&line.text);
                            });
                        }
                    }
                }
            });
        });
}

pub fn render_preview(
    ui: &mut egui::Ui,
    theme: &Theme,
    direction: Direction,
    preview: &PreviewState,
    emit: &mut dyn FnMut(Action),
) {
    ui.with_layout(direction.column(), |ui| {
        if ui.button("Upload a photo").clicked() {
            emit(Action::PickImage);
        }
        if let Some(rejection) = preview.rejection() {
            ui.label(RichText::new(rejection).color(theme.danger));
        }
        if let Some(image) = preview.current() {
            // The data URL doubles as the loader cache key, so new content never
            // shows a stale texture.
            ui.add(
                egui::Image::from_bytes(
                    image.data_url.clone(),
                    egui::load::Bytes::Shared(image.bytes.clone()),
                )
                .max_size(egui::vec2(240.0, 240.0)),
            );
            ui.label(
                RichText::new(format!("{} ({})", image.file_name, image.mime))
                    .color(theme.text_muted)
                    .small(),
            );
        }
    });
}
