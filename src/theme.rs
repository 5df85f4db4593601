use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_0: Color32,
    pub surface_1: Color32,
    pub surface_2: Color32,
    pub accent_primary: Color32,
    pub accent_soft: Color32,
    pub danger: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    pub border_subtle: Color32,
    pub spacing_4: f32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub radius_8: u8,
    pub radius_12: u8,
    pub button_height: f32,
    pub card_width: f32,
    pub thumbnail_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_0: Color32::from_rgb(0xFA, 0xF7, 0xF2),
            surface_1: Color32::from_rgb(0xFF, 0xFF, 0xFF),
            surface_2: Color32::from_rgb(0xF1, 0xEC, 0xE4),
            accent_primary: Color32::from_rgb(0x00, 0x00, 0x00),
            accent_soft: Color32::from_rgb(0xE3, 0x1B, 0x23),
            danger: Color32::from_rgb(0xCC, 0x00, 0x00),
            text_primary: Color32::from_rgb(0x1A, 0x1A, 0x1A),
            text_muted: Color32::from_rgb(0x6B, 0x66, 0x60),
            text_on_accent: Color32::from_rgb(0xFF, 0xFF, 0xFF),
            border_subtle: Color32::from_rgb(0xDD, 0xD6, 0xCC),
            spacing_4: 4.0,
            spacing_8: 8.0,
            spacing_12: 12.0,
            radius_8: 8,
            radius_12: 12,
            button_height: 32.0,
            card_width: 220.0,
            thumbnail_size: 96.0,
        }
    }
}

impl Theme {
    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.surface_0;
        visuals.window_fill = self.surface_1;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.inactive.bg_fill = self.surface_2;
        visuals.widgets.inactive.weak_bg_fill = self.surface_2;
        visuals.widgets.hovered.bg_fill = self.border_subtle;
        visuals.widgets.active.bg_fill = self.accent_primary;
        visuals.selection.bg_fill = self.accent_soft;
        visuals.hyperlink_color = self.accent_soft;

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(18.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    pub fn card_frame(&self, selected: bool) -> Frame {
        let stroke = if selected {
            Stroke::new(2.0, self.accent_soft)
        } else {
            Stroke::new(1.0, self.border_subtle)
        };
        Frame::new()
            .fill(self.surface_1)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(stroke)
    }

    pub fn chip_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_2)
            .inner_margin(Margin::symmetric(self.spacing_8 as i8, self.spacing_4 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::NONE)
    }

    pub fn bubble_frame(&self, fill: Color32) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(self.spacing_8 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::NONE)
    }

    pub fn primary_button(&self, label: &str) -> egui::Button<'static> {
        egui::Button::new(egui::RichText::new(label).color(self.text_on_accent))
            .fill(self.accent_primary)
            .corner_radius(CornerRadius::same(self.radius_8))
            .min_size(egui::vec2(0.0, self.button_height))
    }

    pub fn danger_button(&self, label: &str) -> egui::Button<'static> {
        egui::Button::new(egui::RichText::new(label).color(self.text_on_accent))
            .fill(self.danger)
            .corner_radius(CornerRadius::same(self.radius_8))
            .min_size(egui::vec2(0.0, self.button_height))
    }
}
