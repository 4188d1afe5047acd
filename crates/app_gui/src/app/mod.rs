mod canvas;
mod notices;
mod prompt;
pub mod settings;

use eframe::{App, Frame, egui};
use image::RgbImage;
use labeler_core::{Commit, ImageLoader, Labeler, OverlayStyle, Release, Rect};
use prompt::{LabelPrompt, PromptAnswer};

pub use notices::show as show_notice;

pub struct UiApp<L: ImageLoader> {
    labeler: Labeler<L>,
    style: OverlayStyle,
    prompt: LabelPrompt,
    texture: Option<egui::TextureHandle>,
    // View generation the texture was uploaded for.
    texture_generation: u64,
}

impl<L: ImageLoader> UiApp<L> {
    pub fn new(labeler: Labeler<L>, style: OverlayStyle) -> Self {
        Self {
            labeler,
            style,
            prompt: LabelPrompt::default(),
            texture: None,
            texture_generation: 0,
        }
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        // The renderer refuses textures past this size, so such images are skipped.
        let max_side = ctx.input(|i| i.max_texture_side);
        self.labeler.set_max_extent(u32::try_from(max_side).ok());
        if self.texture_generation == self.labeler.generation() {
            return;
        }
        self.texture_generation = self.labeler.generation();
        self.texture = self
            .labeler
            .view()
            .map(|view| upload(ctx, &view.entry.filename, &view.image));
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if self.labeler.awaiting_label() {
            return;
        }
        let (right, left) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowLeft),
            )
        });
        if right {
            self.labeler.next_image();
        } else if left {
            self.labeler.prev_image();
        }
    }

    fn handle_prompt(&mut self, ctx: &egui::Context) {
        if !self.labeler.awaiting_label() {
            return;
        }
        let commit = match self.prompt.show(ctx) {
            PromptAnswer::Pending => return,
            PromptAnswer::Submitted(text) => self.labeler.submit_label(Some(&text)),
            PromptAnswer::Dismissed => self.labeler.submit_label(None),
        };
        // Keep the typed label around when the write failed so it can be retried.
        if commit != Commit::Failed {
            self.prompt.reset();
        }
    }

    fn show_canvas(&mut self, ui: &mut egui::Ui) {
        let Some(view) = self.labeler.view() else {
            ui.centered_and_justified(|ui| ui.heading("No image to show"));
            return;
        };
        let (w, h) = view.extent();
        let overlays: Vec<Rect> = view.overlays.iter().map(|r| r.rect()).collect();
        let texture = self.texture.as_ref().map(|t| t.id());
        let stroke = canvas::outline(&self.style);

        egui::ScrollArea::both()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let size = egui::vec2(w as f32, h as f32);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
                let origin = response.rect.min;

                if let Some(id) = texture {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(id, response.rect, uv, egui::Color32::WHITE);
                }
                for rect in &overlays {
                    canvas::stroke_box(&painter, origin, *rect, stroke);
                }

                self.track_pointer(ui.ctx(), &response, origin);

                if let Some(draft) = self.labeler.draft_rect() {
                    canvas::stroke_box(&painter, origin, draft, stroke);
                }
            });
    }

    fn track_pointer(&mut self, ctx: &egui::Context, response: &egui::Response, origin: egui::Pos2) {
        let primary = egui::PointerButton::Primary;
        if response.drag_started_by(primary) {
            let start = ctx
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = start {
                self.labeler.press(canvas::to_content(origin, pos));
            }
        }
        if response.dragged_by(primary)
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.labeler.drag(canvas::to_content(origin, pos));
        }
        if response.drag_stopped_by(primary)
            && let Some(pos) = response
                .interact_pointer_pos()
                .or(ctx.input(|i| i.pointer.latest_pos()))
        {
            match self.labeler.release(canvas::to_content(origin, pos)) {
                Release::AwaitingLabel(rect) => {
                    tracing::debug!("box {:?} waiting for a label", rect);
                }
                Release::Discarded | Release::Ignored => {}
            }
        }
    }

    fn title(&self) -> String {
        let images = self.labeler.images();
        format!(
            "{} ({}/{})",
            self.labeler.current().filename,
            images.index() + 1,
            images.len()
        )
    }
}

fn upload(ctx: &egui::Context, name: &str, image: &RgbImage) -> egui::TextureHandle {
    let (w, h) = image.dimensions();
    let color = egui::ColorImage::from_rgb([w as usize, h as usize], image.as_raw());
    ctx.load_texture(format!("image:{name}"), color, egui::TextureOptions::LINEAR)
}

impl<L: ImageLoader> App for UiApp<L> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.handle_keys(ctx);
        self.sync_texture(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.labeler.awaiting_label(), egui::Button::new("◀"))
                    .clicked()
                {
                    self.labeler.prev_image();
                }
                if ui
                    .add_enabled(!self.labeler.awaiting_label(), egui::Button::new("▶"))
                    .clicked()
                {
                    self.labeler.next_image();
                }
                ui.label(self.title());
                ui.separator();
                ui.label(format!("Labels: {}", self.labeler.store().dir().display()));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| self.show_canvas(ui));

        self.handle_prompt(ctx);
        self.sync_texture(ctx);

        // Message boxes block, so they go last once this frame's state is settled.
        let pending = self.labeler.drain_notices();
        for notice in &pending {
            show_notice(notice);
        }
        if !pending.is_empty() {
            ctx.request_repaint();
        }
    }
}
