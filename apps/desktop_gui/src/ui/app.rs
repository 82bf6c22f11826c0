//! eframe shell: draws the view bindings and forwards gestures to the
//! interaction controller.

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use eframe::egui;

use crate::{
    clipboard::SystemClipboard,
    controller::{events::UiEvent, InteractionController},
    ui::{
        render::{BulletGroup, RiskView},
        views::{ActionControl, ControlStyle, Views},
    },
};

const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(34, 139, 84);

/// Gestures collected while drawing and applied once the frame's borrows of
/// the view bindings have ended.
enum Gesture {
    Submit,
    Example(String),
    Explain,
    Copy,
    Reset,
}

pub struct PolicyGenApp {
    controller: InteractionController<SystemClipboard>,
    ui_rx: Receiver<UiEvent>,
}

impl PolicyGenApp {
    pub fn new(controller: InteractionController<SystemClipboard>, ui_rx: Receiver<UiEvent>) -> Self {
        Self { controller, ui_rx }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.handle_event(event);
        }
    }

    fn apply(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Submit => {
                let prompt = self.controller.views().prompt.text.clone();
                self.controller.on_generate_submit(&prompt);
            }
            Gesture::Example(prompt) => self.controller.on_example_select(&prompt),
            Gesture::Explain => self.controller.on_explain_request(),
            Gesture::Copy => self.controller.on_copy_request(Instant::now()),
            Gesture::Reset => self.controller.on_reset_request(),
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        let views = self.controller.views();
        egui::TopBottomPanel::top("header_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("IAM Policy Generator");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&views.status).weak());
                    if views.window_busy {
                        ui.spinner();
                    }
                });
            });
        });
    }

    fn show_prompt_panel(&mut self, ctx: &egui::Context, gestures: &mut Vec<Gesture>) {
        let focus = self.controller.take_prompt_focus_request();
        egui::SidePanel::left("prompt_panel")
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Describe the access you need").strong());
                ui.add_space(4.0);
                let response = ui.add(
                    egui::TextEdit::multiline(self.controller.prompt_text_mut())
                        .desired_rows(6)
                        .desired_width(f32::INFINITY)
                        .hint_text("e.g. Give EC2 read-only access to S3"),
                );
                if focus {
                    response.request_focus();
                }

                let views = self.controller.views();
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if action_button(ui, &views.generate) {
                        gestures.push(Gesture::Submit);
                    }
                    if views.busy_indicator {
                        ui.spinner();
                    }
                });
                ui.small(egui::RichText::new("Ctrl+Enter to generate").weak());

                ui.separator();
                ui.label(egui::RichText::new("Examples").strong());
                egui::ScrollArea::vertical()
                    .id_salt("example_prompts_scroll")
                    .show(ui, |ui| {
                        for example in &views.examples {
                            if ui.link(example.as_str()).clicked() {
                                gestures.push(Gesture::Example(example.clone()));
                            }
                        }
                    });
            });
    }

    fn show_output_area(&self, ctx: &egui::Context, gestures: &mut Vec<Gesture>) {
        let views = self.controller.views();
        egui::CentralPanel::default().show(ctx, |ui| {
            show_toolbar(ui, views, gestures);

            if let Some(error) = &views.error {
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        let color = ui.visuals().error_fg_color;
                        ui.colored_label(color, error.message.as_str());
                    });
                ui.add_space(8.0);
            }

            egui::ScrollArea::vertical()
                .id_salt("output_scroll")
                .show(ui, |ui| {
                    if views.placeholder_visible {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.label(
                                egui::RichText::new(
                                    "Your generated policy will appear here.",
                                )
                                .weak(),
                            );
                        });
                    }

                    if views.output.visible {
                        ui.label(egui::RichText::new("Policy").strong());
                        ui.add(
                            egui::TextEdit::multiline(&mut views.output.policy_text.as_str())
                                .code_editor()
                                .desired_width(f32::INFINITY),
                        );
                        if let Some(risk) = &views.output.risk {
                            ui.add_space(8.0);
                            show_risk(ui, risk);
                        }
                    }

                    if let Some(explanation) = &views.explanation {
                        ui.add_space(8.0);
                        ui.separator();
                        ui.label(egui::RichText::new("Explanation").strong());
                        ui.label(explanation.text.as_str());
                    }
                });
        });
    }
}

impl eframe::App for PolicyGenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.controller.tick(Instant::now());

        let mut gestures = Vec::new();
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter)) {
            gestures.push(Gesture::Submit);
        }

        self.show_header(ctx);
        self.show_prompt_panel(ctx, &mut gestures);
        self.show_output_area(ctx, &mut gestures);

        for gesture in gestures {
            self.apply(gesture);
        }

        // Backend completions arrive without user input.
        let mut repaint_after = Duration::from_millis(100);
        if let Some(deadline) = self.controller.next_deadline() {
            repaint_after = repaint_after.min(deadline.saturating_duration_since(Instant::now()));
        }
        ctx.request_repaint_after(repaint_after);
    }
}

/// Draws `control` if visible and reports a click.
fn action_button(ui: &mut egui::Ui, control: &ActionControl) -> bool {
    if !control.visible {
        return false;
    }
    let mut button = egui::Button::new(control.label);
    if control.style == ControlStyle::Success {
        button = button.fill(SUCCESS_FILL);
    }
    ui.add_enabled(control.enabled, button).clicked()
}

fn show_toolbar(ui: &mut egui::Ui, views: &Views, gestures: &mut Vec<Gesture>) {
    if !(views.copy.visible || views.explain.visible || views.reset.visible) {
        return;
    }
    ui.horizontal(|ui| {
        if action_button(ui, &views.copy) {
            gestures.push(Gesture::Copy);
        }
        if action_button(ui, &views.explain) {
            gestures.push(Gesture::Explain);
        }
        if action_button(ui, &views.reset) {
            gestures.push(Gesture::Reset);
        }
    });
    ui.add_space(8.0);
}

fn risk_color(style_token: &str) -> egui::Color32 {
    match style_token {
        "minimal" => egui::Color32::from_rgb(46, 160, 67),
        "low" => egui::Color32::from_rgb(110, 180, 60),
        "medium" => egui::Color32::from_rgb(219, 154, 4),
        _ => egui::Color32::from_rgb(207, 34, 46),
    }
}

fn show_risk(ui: &mut egui::Ui, risk: &RiskView) {
    let color = risk_color(risk.style_token);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(&risk.badge_label)
                    .strong()
                    .color(color),
            );
            ui.label(egui::RichText::new(&risk.score_label).monospace());
        });
        if !risk.summary.is_empty() {
            ui.label(risk.summary.as_str());
        }
        for group in [&risk.issues, &risk.recommendations].into_iter().flatten() {
            show_bullet_group(ui, group);
        }
    });
}

fn show_bullet_group(ui: &mut egui::Ui, group: &BulletGroup) {
    ui.add_space(4.0);
    ui.label(egui::RichText::new(group.title).strong());
    for item in &group.items {
        ui.label(format!("• {item}"));
    }
}
