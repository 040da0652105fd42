use argh::FromArgs;
use eframe::egui::{self, TextureOptions};
use std::path::PathBuf;

use segview::annotate::{
    build_detections, colors::DEFAULT_SEED,
    report::{ClassInventory, InstanceSummary},
    ClassNames, ColorTable, RawDetection,
};
use segview::image::ImageSize;
use segview::io::jpeg::read_image_jpeg_rgb8;
use segview::viewer::{session::DEFAULT_EXPORT_PATH, Command, Control, Session, ViewerEvent};

#[derive(FromArgs)]
/// Inspect the detections of a segmentation model interactively
struct Args {
    /// path to the input JPEG image
    #[argh(option, short = 'i')]
    image: PathBuf,

    /// path to the JSON list of raw detections
    #[argh(option, short = 'd')]
    detections: PathBuf,

    /// path to the class names, one per line
    #[argh(option, short = 'c')]
    classes: Option<PathBuf>,

    /// path of the frame written by the `s` key
    #[argh(option, short = 'e', default = "PathBuf::from(DEFAULT_EXPORT_PATH)")]
    export: PathBuf,

    /// seed of the class colors
    #[argh(option, default = "DEFAULT_SEED")]
    seed: u64,
}

const KEYS: [(egui::Key, char); 6] = [
    (egui::Key::B, 'b'),
    (egui::Key::L, 'l'),
    (egui::Key::M, 'm'),
    (egui::Key::R, 'r'),
    (egui::Key::S, 's'),
    (egui::Key::Escape, Command::ESCAPE),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let image = read_image_jpeg_rgb8(&args.image)?;
    let raws: Vec<RawDetection> =
        serde_json::from_str(&std::fs::read_to_string(&args.detections)?)?;
    let names = match &args.classes {
        Some(path) => ClassNames::from_lines(&std::fs::read_to_string(path)?),
        None => ClassNames::default(),
    };
    let colors = ColorTable::from_class_names(&names, args.seed);
    let detections = build_detections(&raws, image.size(), &names, &colors);
    log::info!("loaded {} detections", detections.len());
    let inventory = ClassInventory::from_detections(&names, &detections);

    let inner_size = [
        (image.width() as f32).min(1280.0),
        (image.height() as f32).min(900.0) + 24.0,
    ];
    let app = ViewerApp::new(Session::new(image, detections, &args.export), inventory);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(inner_size),
        ..Default::default()
    };

    eframe::run_native(
        "segview",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;

    Ok(())
}

struct ViewerApp {
    session: Session,
    inventory: ClassInventory,
    texture: Option<egui::TextureHandle>,
    view_size: ImageSize,
    dirty: bool,
}

impl ViewerApp {
    fn new(session: Session, inventory: ClassInventory) -> Self {
        Self {
            session,
            inventory,
            texture: None,
            view_size: ImageSize::default(),
            dirty: true,
        }
    }

    /// Translate the egui input of this frame into viewer events.
    fn collect_events(&self, ctx: &egui::Context, rect: egui::Rect) -> Vec<ViewerEvent> {
        let local = |pos: egui::Pos2| [pos.x - rect.min.x, pos.y - rect.min.y];

        ctx.input(|i| {
            let mut events = Vec::new();

            if i.raw_scroll_delta.y != 0.0 {
                if let Some(pos) = i.pointer.hover_pos().filter(|p| rect.contains(*p)) {
                    events.push(ViewerEvent::Scroll {
                        position: local(pos),
                        delta: i.raw_scroll_delta.y,
                    });
                }
            }

            for event in &i.events {
                match event {
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed,
                        ..
                    } => {
                        if !*pressed {
                            events.push(ViewerEvent::PointerUp(local(*pos)));
                        } else if rect.contains(*pos) {
                            events.push(ViewerEvent::PointerDown(local(*pos)));
                        }
                    }
                    egui::Event::PointerMoved(pos) => {
                        events.push(ViewerEvent::PointerMove(local(*pos)));
                    }
                    _ => {}
                }
            }

            for (key, c) in KEYS {
                if i.key_pressed(key) {
                    if let Some(command) = Command::from_key(c) {
                        events.push(ViewerEvent::Key(command));
                    }
                }
            }

            events
        })
    }

    fn status(&self) -> String {
        let toggles = self.session.toggles();
        let mut text = format!(
            "zoom {:.2}  boxes {}  labels {}  masks {}",
            self.session.viewport().zoom(),
            toggles.show_boxes,
            toggles.show_labels,
            toggles.show_masks,
        );
        if let Some(summary) = self.session.selected_summary() {
            text.push_str(&format!("  |  {}", describe(&summary)));
        }
        if let Some(detection) = self
            .session
            .hovered()
            .and_then(|index| self.session.detections().get(index))
        {
            text.push_str(&format!("  |  hover {}", detection.label));
        }
        text
    }
}

fn describe(summary: &InstanceSummary) -> String {
    format!(
        "#{} {} {:.2} {:?} area {}",
        summary.id, summary.label, summary.confidence, summary.status, summary.area
    )
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status());
        });

        egui::SidePanel::right("classes").show(ctx, |ui| {
            ui.heading("Found");
            for label in &self.inventory.found {
                if ui.button(label).clicked() {
                    self.session.select_label(label);
                    self.dirty = true;
                }
            }
            ui.separator();
            ui.heading("Missing");
            for label in &self.inventory.missing {
                ui.add_enabled(false, egui::Button::new(label));
            }
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                ui.allocate_rect(rect, egui::Sense::click_and_drag());

                for event in self.collect_events(ctx, rect) {
                    self.dirty = true;
                    if self.session.handle(event) == Control::Quit {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }

                let view_size = ImageSize {
                    width: rect.width().max(1.0) as usize,
                    height: rect.height().max(1.0) as usize,
                };
                if view_size != self.view_size {
                    self.view_size = view_size;
                    self.dirty = true;
                }

                if self.dirty {
                    match self.session.view(view_size) {
                        Ok(view) => {
                            let color_image = egui::ColorImage::from_rgb(
                                [view.cols(), view.rows()],
                                view.as_slice(),
                            );
                            match self.texture.as_mut() {
                                Some(texture) => texture.set(color_image, TextureOptions::NEAREST),
                                None => {
                                    self.texture = Some(ctx.load_texture(
                                        "segview",
                                        color_image,
                                        TextureOptions::NEAREST,
                                    ))
                                }
                            }
                        }
                        Err(err) => log::error!("failed to render the view: {err}"),
                    }
                    self.dirty = false;
                }

                if let Some(texture) = self.texture.as_ref() {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter()
                        .image(texture.id(), rect, uv, egui::Color32::WHITE);
                }
            });
    }
}
