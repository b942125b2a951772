//! Single-page studio view rendered with egui.
//!
//! The page is one vertical scroll area split into anchored sections. The
//! top bar stays pinned above it and switches from a translucent-over-hero
//! fill to a solid fill once the user scrolls past the threshold.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Datelike;
use crossbeam_channel::{Receiver, Sender};
use egui::{Color32, CornerRadius, Margin, RichText};
use shared::domain::{ClassId, ClassSummary, ContactField, SubmissionStatus};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

/// Scroll depth past which the top bar drops its over-hero treatment.
const TOP_BAR_SCROLL_THRESHOLD: f32 = 50.0;
/// Window widths below this collapse the nav links behind a menu toggle.
const NARROW_LAYOUT_WIDTH: f32 = 720.0;

const ACCENT_RED: Color32 = Color32::from_rgb(220, 38, 38);
const ACCENT_RED_SOFT: Color32 = Color32::from_rgb(248, 113, 113);
const HERO_FILL: Color32 = Color32::from_rgb(17, 17, 22);
const TOP_BAR_OVER_HERO: Color32 = Color32::from_rgb(24, 24, 30);
const TOP_BAR_SOLID: Color32 = Color32::from_rgb(10, 10, 14);
const SECTION_LIGHT: Color32 = Color32::from_rgb(249, 250, 251);
const SECTION_WHITE: Color32 = Color32::WHITE;
const CONTACT_FILL: Color32 = Color32::from_rgb(12, 12, 16);
const CONTACT_CARD: Color32 = Color32::from_rgb(31, 41, 55);
const FOOTER_FILL: Color32 = Color32::from_rgb(17, 24, 39);
const TEXT_DARK: Color32 = Color32::from_rgb(17, 24, 39);
const TEXT_BODY: Color32 = Color32::from_rgb(55, 65, 81);
const TEXT_MUTED: Color32 = Color32::from_rgb(107, 114, 128);
const TEXT_LIGHT: Color32 = Color32::from_rgb(209, 213, 219);
const CARD_STROKE: Color32 = Color32::from_rgb(229, 231, 235);
const PLACEHOLDER_FILL: Color32 = Color32::from_rgb(224, 224, 224);
const SUCCESS_BANNER_FILL: Color32 = Color32::from_rgb(187, 247, 208);
const SUCCESS_BANNER_TEXT: Color32 = Color32::from_rgb(22, 101, 52);
const ERROR_BANNER_FILL: Color32 = Color32::from_rgb(254, 202, 202);
const ERROR_BANNER_TEXT: Color32 = Color32::from_rgb(153, 27, 27);

const CLASS_SCHEDULE: [(&str, &[&str]); 3] = [
    (
        "Monday - Friday",
        &[
            "6:00 PM - 7:30 PM (Beginner)",
            "7:30 PM - 9:00 PM (Intermediate)",
        ],
    ),
    (
        "Saturday",
        &[
            "10:00 AM - 12:00 PM (Advanced)",
            "1:00 PM - 2:30 PM (Kids Class)",
        ],
    ),
    ("Sunday", &["Closed for Rest & Reflection"]),
];

// (initials, name, role, bio)
const INSTRUCTORS: [(&str, &str, &str, &str); 2] = [
    (
        "MJ",
        "Master Joseph",
        "Head Instructor & Founder",
        "With over 25 years of experience, Master Joseph holds a 7th Dan black \
         belt and has trained students worldwide. His approach combines \
         traditional techniques with modern teaching methods.",
    ),
    (
        "SM",
        "Sensei Maria",
        "Senior Instructor",
        "Sensei Maria specializes in youth programs and holds a 4th Dan black \
         belt. She brings 15 years of experience in developing young martial \
         artists with patience and expertise.",
    ),
];

/// Settings the binary resolves before the event loop starts.
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub collaborator_base_url: String,
    pub window_title: String,
    pub initial_window_size: [f32; 2],
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            collaborator_base_url: "http://localhost:5000".to_string(),
            window_title: "Joseph Karate DOJO".to_string(),
            initial_window_size: [1280.0, 860.0],
        }
    }
}

/// Decoded class photo handed over from the backend worker. Stays CPU-side
/// until the UI thread uploads it as a texture.
#[derive(Debug, Clone)]
pub struct PhotoImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

enum ClassPhotoState {
    Loading,
    Ready {
        image: PhotoImage,
        texture: Option<egui::TextureHandle>,
    },
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Section {
    Home,
    About,
    Classes,
    Instructors,
    Contact,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Home,
        Section::About,
        Section::Classes,
        Section::Instructors,
        Section::Contact,
    ];

    fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Classes => "Classes",
            Section::Instructors => "Instructors",
            Section::Contact => "Contact",
        }
    }
}

pub struct DojoApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    classes: Vec<ClassSummary>,
    photos: HashMap<ClassId, ClassPhotoState>,
    name_input: String,
    email_input: String,
    message_input: String,
    submission_status: Option<SubmissionStatus>,
    menu_open: bool,
    scroll_offset: f32,
    pending_scroll_offset: Option<f32>,
    section_offsets: HashMap<Section, f32>,
    status: String,
}

impl DojoApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            classes: Vec::new(),
            photos: HashMap::new(),
            name_input: String::new(),
            email_input: String::new(),
            message_input: String::new(),
            submission_status: None,
            menu_open: false,
            scroll_offset: 0.0,
            pending_scroll_offset: None,
            section_offsets: HashMap::new(),
            status: String::new(),
        };
        // The class listing loads once, as soon as the window exists.
        if let Err(note) = dispatch_backend_command(&app.cmd_tx, BackendCommand::LoadClasses) {
            app.note_dispatch_failure(note);
        }
        app
    }

    /// Routes a queue rejection through the shared error categorization so
    /// the footer status reads like every other surfaced failure.
    fn note_dispatch_failure(&mut self, note: String) {
        let err = UiError::from_message(UiErrorContext::General, note);
        self.status = format!("{}: {}", err.label(), err.message());
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(note) => self.status = note,
                UiEvent::Error(err) => {
                    self.status = format!("{}: {}", err.label(), err.message());
                }
                UiEvent::ClassesLoaded(classes) => self.classes = classes,
                UiEvent::SubmissionStatusChanged(status) => self.submission_status = status,
                UiEvent::ContactDraftReset => {
                    self.name_input.clear();
                    self.email_input.clear();
                    self.message_input.clear();
                }
                UiEvent::ClassPhotoLoaded { class_id, image } => {
                    self.photos.insert(
                        class_id,
                        ClassPhotoState::Ready {
                            image,
                            texture: None,
                        },
                    );
                }
                UiEvent::ClassPhotoFailed { class_id, reason } => {
                    tracing::warn!("photo for class {class_id} unavailable: {reason}");
                    self.photos.insert(class_id, ClassPhotoState::Unavailable);
                }
            }
        }
    }

    fn request_scroll_to(&mut self, section: Section) {
        if let Some(offset) = self.section_offsets.get(&section).copied() {
            self.pending_scroll_offset = Some(offset.max(0.0));
        }
        self.menu_open = false;
    }

    fn forward_field(&mut self, field: ContactField) {
        let value = match field {
            ContactField::Name => self.name_input.clone(),
            ContactField::Email => self.email_input.clone(),
            ContactField::Message => self.message_input.clone(),
        };
        if let Err(note) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::UpdateContactField { field, value })
        {
            self.note_dispatch_failure(note);
        }
    }

    fn ensure_photo_requested(&mut self, class: &ClassSummary) {
        if self.photos.contains_key(&class.id) {
            return;
        }
        let state = match &class.image_url {
            Some(url) => {
                let cmd = BackendCommand::FetchClassPhoto {
                    class_id: class.id,
                    url: url.clone(),
                };
                match dispatch_backend_command(&self.cmd_tx, cmd) {
                    Ok(()) => ClassPhotoState::Loading,
                    Err(note) => {
                        self.note_dispatch_failure(note);
                        ClassPhotoState::Unavailable
                    }
                }
            }
            None => ClassPhotoState::Unavailable,
        };
        self.photos.insert(class.id, state);
    }

    /// Returns the GPU texture for a ready photo, uploading it on first use.
    fn photo_texture(&mut self, ctx: &egui::Context, class_id: ClassId) -> Option<egui::TextureHandle> {
        match self.photos.get_mut(&class_id) {
            Some(ClassPhotoState::Ready { image, texture }) => {
                if texture.is_none() {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    *texture = Some(ctx.load_texture(
                        format!("class-photo-{class_id}"),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                texture.clone()
            }
            _ => None,
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, narrow: bool) {
        let fill = if top_bar_is_opaque(self.scroll_offset) {
            TOP_BAR_SOLID
        } else {
            TOP_BAR_OVER_HERO
        };
        let mut nav_request: Option<Section> = None;
        egui::TopBottomPanel::top("top_nav_bar")
            .frame(egui::Frame::new().fill(fill).inner_margin(Margin::symmetric(16, 10)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    draw_brand(ui);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if narrow {
                            let icon = if self.menu_open { "✕" } else { "☰" };
                            let toggle = egui::Button::new(
                                RichText::new(icon).size(20.0).color(Color32::WHITE),
                            )
                            .fill(Color32::TRANSPARENT);
                            if ui.add(toggle).clicked() {
                                self.menu_open = !self.menu_open;
                            }
                        } else {
                            for section in Section::ALL.iter().rev() {
                                if nav_link(ui, section.label()).clicked() {
                                    nav_request = Some(*section);
                                }
                            }
                        }
                    });
                });
            });
        if narrow && self.menu_open {
            egui::TopBottomPanel::top("top_nav_menu")
                .frame(
                    egui::Frame::new()
                        .fill(TOP_BAR_SOLID)
                        .inner_margin(Margin::symmetric(16, 8)),
                )
                .show(ctx, |ui| {
                    for section in Section::ALL {
                        if nav_link(ui, section.label()).clicked() {
                            nav_request = Some(section);
                        }
                    }
                });
        }
        if let Some(section) = nav_request {
            self.request_scroll_to(section);
        }
    }

    fn show_page(&mut self, ctx: &egui::Context, narrow: bool) {
        let mut nav_request: Option<Section> = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(SECTION_WHITE))
            .show(ctx, |ui| {
                let mut scroll = egui::ScrollArea::vertical()
                    .id_salt("studio_page")
                    .auto_shrink([false, false]);
                if let Some(offset) = self.pending_scroll_offset.take() {
                    scroll = scroll.vertical_scroll_offset(offset);
                }
                let output = scroll.show(ui, |ui| {
                    let origin = ui.cursor().top();
                    self.record_section(Section::Home, ui, origin);
                    self.hero_section(ui, &mut nav_request);
                    self.record_section(Section::About, ui, origin);
                    self.about_section(ui, narrow);
                    self.record_section(Section::Classes, ui, origin);
                    self.classes_section(ui, narrow, &mut nav_request);
                    self.record_section(Section::Instructors, ui, origin);
                    self.instructors_section(ui, narrow);
                    self.record_section(Section::Contact, ui, origin);
                    self.contact_section(ui, narrow);
                    self.footer(ui);
                });
                self.scroll_offset = output.state.offset.y;
            });
        if let Some(section) = nav_request {
            self.request_scroll_to(section);
        }
    }

    /// Notes where a section starts, relative to the scroll content origin,
    /// so nav clicks can target it on the next frame.
    fn record_section(&mut self, section: Section, ui: &egui::Ui, origin: f32) {
        self.section_offsets.insert(section, ui.cursor().top() - origin);
    }

    fn hero_section(&mut self, ui: &mut egui::Ui, nav_request: &mut Option<Section>) {
        egui::Frame::new()
            .fill(HERO_FILL)
            .inner_margin(Margin::symmetric(24, 110))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Joseph Karate")
                            .size(52.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                    ui.label(RichText::new("DOJO").size(52.0).strong().color(ACCENT_RED));
                    ui.add_space(14.0);
                    ui.label(
                        RichText::new("Discipline. Strength. Honor. Begin your martial arts journey today.")
                            .size(18.0)
                            .color(TEXT_LIGHT),
                    );
                    ui.add_space(26.0);
                    ui.horizontal(|ui| {
                        let gap = 12.0;
                        let button_width = 150.0;
                        let lead = (ui.available_width() - button_width * 2.0 - gap).max(0.0) / 2.0;
                        ui.add_space(lead);
                        if hero_button(ui, "View Classes", button_width, true).clicked() {
                            *nav_request = Some(Section::Classes);
                        }
                        ui.add_space(gap);
                        if hero_button(ui, "Get Started", button_width, false).clicked() {
                            *nav_request = Some(Section::Contact);
                        }
                    });
                });
            });
    }

    fn about_section(&mut self, ui: &mut egui::Ui, narrow: bool) {
        egui::Frame::new()
            .fill(SECTION_LIGHT)
            .inner_margin(Margin::symmetric(32, 56))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    section_heading(ui, "Our Philosophy");
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(
                            "At Joseph Karate DOJO, we believe in the transformative power \
                             of martial arts to build character, discipline, and inner \
                             strength.",
                        )
                        .size(16.0)
                        .color(TEXT_MUTED),
                    );
                });
                ui.add_space(24.0);
                let render_text = |ui: &mut egui::Ui| {
                    ui.label(
                        RichText::new("Traditional Values, Modern Training")
                            .size(24.0)
                            .strong()
                            .color(TEXT_DARK),
                    );
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(
                            "Founded on the principles of respect, discipline, and \
                             continuous improvement, our dojo honors the ancient traditions \
                             of Karate while embracing modern training methodologies.",
                        )
                        .size(15.0)
                        .color(TEXT_BODY),
                    );
                };
                let render_cards = |ui: &mut egui::Ui| {
                    about_card(ui, "🥋", "Community", "Strong bonds & support");
                    ui.add_space(12.0);
                    about_card(ui, "🏆", "Excellence", "Pursuing mastery");
                };
                if narrow {
                    render_text(ui);
                    ui.add_space(20.0);
                    render_cards(ui);
                } else {
                    ui.columns(2, |cols| {
                        render_text(&mut cols[0]);
                        render_cards(&mut cols[1]);
                    });
                }
            });
    }

    fn classes_section(&mut self, ui: &mut egui::Ui, narrow: bool, nav_request: &mut Option<Section>) {
        egui::Frame::new()
            .fill(SECTION_WHITE)
            .inner_margin(Margin::symmetric(32, 56))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    section_heading(ui, "Our Classes");
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(
                            "Discover the perfect class for your skill level and goals. \
                             From beginner-friendly basics to advanced techniques.",
                        )
                        .size(16.0)
                        .color(TEXT_MUTED),
                    );
                });
                ui.add_space(24.0);
                if self.classes.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new("Loading classes or no classes available...")
                                .size(16.0)
                                .color(TEXT_MUTED),
                        );
                    });
                    return;
                }
                let columns = if narrow {
                    1
                } else {
                    grid_columns_for_width(ui.available_width())
                };
                let classes = self.classes.clone();
                for row in classes.chunks(columns) {
                    ui.columns(columns, |cols| {
                        for (class, col) in row.iter().zip(cols.iter_mut()) {
                            self.class_card(col, class, nav_request);
                        }
                    });
                    ui.add_space(16.0);
                }
            });
    }

    fn class_card(&mut self, ui: &mut egui::Ui, class: &ClassSummary, nav_request: &mut Option<Section>) {
        self.ensure_photo_requested(class);
        egui::Frame::new()
            .fill(SECTION_WHITE)
            .stroke(egui::Stroke::new(1.0, CARD_STROKE))
            .corner_radius(CornerRadius::same(10))
            .inner_margin(Margin::symmetric(14, 14))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                let photo_size = egui::vec2(ui.available_width(), 150.0);
                if let Some(texture) = self.photo_texture(ui.ctx(), class.id) {
                    ui.add(egui::Image::new(&texture).fit_to_exact_size(photo_size));
                } else if matches!(self.photos.get(&class.id), Some(ClassPhotoState::Loading)) {
                    let (rect, _) = ui.allocate_exact_size(photo_size, egui::Sense::hover());
                    ui.painter()
                        .rect_filled(rect, CornerRadius::same(8), PLACEHOLDER_FILL);
                    ui.put(rect, egui::Spinner::new().size(22.0));
                } else {
                    draw_photo_placeholder(ui, photo_size);
                }
                ui.add_space(10.0);
                ui.label(RichText::new(&class.name).size(19.0).strong().color(TEXT_DARK));
                ui.add_space(6.0);
                ui.label(RichText::new(&class.description).size(14.0).color(TEXT_BODY));
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("🕐 {}", class.schedule))
                        .size(13.0)
                        .color(TEXT_MUTED),
                );
                ui.label(
                    RichText::new(format!("👤 {}", class.age_group))
                        .size(13.0)
                        .color(TEXT_MUTED),
                );
                ui.add_space(10.0);
                let join = egui::Button::new(
                    RichText::new("Join Class").strong().color(Color32::WHITE),
                )
                .fill(ACCENT_RED)
                .corner_radius(CornerRadius::same(6))
                .min_size(egui::vec2(ui.available_width(), 34.0));
                if ui.add(join).clicked() {
                    *nav_request = Some(Section::Contact);
                }
            });
    }

    fn instructors_section(&mut self, ui: &mut egui::Ui, narrow: bool) {
        egui::Frame::new()
            .fill(SECTION_LIGHT)
            .inner_margin(Margin::symmetric(32, 56))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    section_heading(ui, "Meet Our Instructors");
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(
                            "Learn from experienced masters dedicated to your martial \
                             arts journey.",
                        )
                        .size(16.0)
                        .color(TEXT_MUTED),
                    );
                });
                ui.add_space(24.0);
                if narrow {
                    for (index, (initials, name, role, bio)) in INSTRUCTORS.iter().enumerate() {
                        if index > 0 {
                            ui.add_space(20.0);
                        }
                        instructor_card(ui, initials, name, role, bio);
                    }
                } else {
                    ui.columns(INSTRUCTORS.len(), |cols| {
                        for ((initials, name, role, bio), col) in
                            INSTRUCTORS.iter().zip(cols.iter_mut())
                        {
                            instructor_card(col, initials, name, role, bio);
                        }
                    });
                }
            });
    }

    fn contact_section(&mut self, ui: &mut egui::Ui, narrow: bool) {
        egui::Frame::new()
            .fill(CONTACT_FILL)
            .inner_margin(Margin::symmetric(32, 56))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                if narrow {
                    self.contact_info(ui);
                    ui.add_space(24.0);
                    class_schedule(ui);
                } else {
                    ui.columns(2, |cols| {
                        self.contact_info(&mut cols[0]);
                        class_schedule(&mut cols[1]);
                    });
                }
                ui.add_space(28.0);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(520.0);
                    self.contact_form(ui);
                });
            });
    }

    fn contact_info(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Visit Our Dojo")
                .size(22.0)
                .strong()
                .color(Color32::WHITE),
        );
        ui.add_space(14.0);
        contact_row(ui, "📍", "Location", "123 Martial Arts Way\nWarrior City, WC 12345");
        contact_row(ui, "📞", "Phone", "(555) 123-KATA");
        contact_row(ui, "✉", "Email", "info@josephkaratedojo.com");
    }

    fn contact_form(&mut self, ui: &mut egui::Ui) {
        egui::Frame::new()
            .fill(CONTACT_CARD)
            .corner_radius(CornerRadius::same(10))
            .inner_margin(Margin::symmetric(18, 18))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new("Send Us a Message")
                        .size(20.0)
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.add_space(12.0);
                if labeled_text_field(ui, "Name", "Your Name", &mut self.name_input, false)
                    .changed()
                {
                    self.forward_field(ContactField::Name);
                }
                if labeled_text_field(ui, "Email", "Your Email", &mut self.email_input, false)
                    .changed()
                {
                    self.forward_field(ContactField::Email);
                }
                if labeled_text_field(ui, "Message", "Your Message", &mut self.message_input, true)
                    .changed()
                {
                    self.forward_field(ContactField::Message);
                }
                if let Some(status) = &self.submission_status {
                    let (fill, text) = if status.is_success() {
                        (SUCCESS_BANNER_FILL, SUCCESS_BANNER_TEXT)
                    } else {
                        (ERROR_BANNER_FILL, ERROR_BANNER_TEXT)
                    };
                    let message = status.message().to_string();
                    egui::Frame::new()
                        .fill(fill)
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(RichText::new(message).color(text));
                        });
                    ui.add_space(10.0);
                }
                let ready = form_is_ready(&self.name_input, &self.email_input, &self.message_input);
                let send = egui::Button::new(
                    RichText::new("Send Message").size(16.0).strong().color(Color32::WHITE),
                )
                .fill(ACCENT_RED)
                .corner_radius(CornerRadius::same(8))
                .min_size(egui::vec2(ui.available_width(), 44.0));
                if ui.add_enabled(ready, send).clicked() {
                    if let Err(note) =
                        dispatch_backend_command(&self.cmd_tx, BackendCommand::SubmitContact)
                    {
                        self.submission_status = Some(SubmissionStatus::Error(note));
                    }
                }
            });
    }

    fn footer(&mut self, ui: &mut egui::Ui) {
        egui::Frame::new()
            .fill(FOOTER_FILL)
            .inner_margin(Margin::symmetric(24, 28))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.horizontal(|ui| {
                        let lead = (ui.available_width() - 220.0).max(0.0) / 2.0;
                        ui.add_space(lead);
                        ui.label(RichText::new("Joseph Karate").strong().color(Color32::WHITE));
                        ui.label(RichText::new("DOJO").strong().color(ACCENT_RED));
                    });
                    ui.add_space(6.0);
                    let year = chrono::Utc::now().year();
                    ui.label(
                        RichText::new(footer_copyright(year))
                            .size(13.0)
                            .color(TEXT_MUTED),
                    );
                    if !self.status.is_empty() {
                        ui.add_space(6.0);
                        ui.label(RichText::new(&self.status).size(11.0).weak());
                    }
                });
            });
    }
}

impl eframe::App for DojoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let narrow = ctx.screen_rect().width() < NARROW_LAYOUT_WIDTH;
        if !narrow {
            self.menu_open = false;
        }
        self.show_top_bar(ctx, narrow);
        self.show_page(ctx, narrow);
        // Backend events arrive off-frame, so keep polling at a low cadence.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn top_bar_is_opaque(scroll_offset: f32) -> bool {
    scroll_offset > TOP_BAR_SCROLL_THRESHOLD
}

fn grid_columns_for_width(width: f32) -> usize {
    if width < 700.0 {
        1
    } else if width < 1040.0 {
        2
    } else {
        3
    }
}

fn form_is_ready(name: &str, email: &str, message: &str) -> bool {
    !name.is_empty() && !email.is_empty() && !message.is_empty()
}

fn footer_copyright(year: i32) -> String {
    format!(
        "© {year} Joseph Karate DOJO. All rights reserved. | Building Character Through Martial Arts"
    )
}

fn draw_brand(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 16.0, ACCENT_RED);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "JKD",
        egui::FontId::proportional(11.0),
        Color32::WHITE,
    );
    ui.add_space(8.0);
    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing.y = 0.0;
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.label(RichText::new("Joseph Karate").strong().color(Color32::WHITE));
            ui.label(RichText::new("DOJO").strong().color(ACCENT_RED));
        });
        ui.label(
            RichText::new("Traditional Martial Arts")
                .size(11.0)
                .color(TEXT_MUTED),
        );
    });
}

fn nav_link(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new(label).size(15.0).color(Color32::WHITE))
            .fill(Color32::TRANSPARENT),
    )
}

fn hero_button(ui: &mut egui::Ui, label: &str, width: f32, filled: bool) -> egui::Response {
    let text = RichText::new(label).size(16.0).strong().color(Color32::WHITE);
    let mut button = egui::Button::new(text)
        .corner_radius(CornerRadius::same(8))
        .min_size(egui::vec2(width, 44.0));
    button = if filled {
        button.fill(ACCENT_RED)
    } else {
        button
            .fill(Color32::TRANSPARENT)
            .stroke(egui::Stroke::new(2.0, Color32::WHITE))
    };
    ui.add(button)
}

fn section_heading(ui: &mut egui::Ui, title: &str) {
    ui.label(RichText::new(title).size(32.0).strong().color(TEXT_DARK));
    ui.add_space(4.0);
    heading_underline(ui);
}

fn heading_underline(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(64.0, 4.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, CornerRadius::same(2), ACCENT_RED);
}

fn about_card(ui: &mut egui::Ui, icon: &str, title: &str, blurb: &str) {
    egui::Frame::new()
        .fill(SECTION_WHITE)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::symmetric(16, 16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(icon).size(26.0));
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(17.0).strong().color(TEXT_DARK));
                    ui.label(RichText::new(blurb).size(13.0).color(TEXT_MUTED));
                });
            });
        });
}

fn instructor_card(ui: &mut egui::Ui, initials: &str, name: &str, role: &str, bio: &str) {
    egui::Frame::new()
        .fill(SECTION_WHITE)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::symmetric(18, 22))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(80.0, 80.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 40.0, ACCENT_RED);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    initials,
                    egui::FontId::proportional(26.0),
                    Color32::WHITE,
                );
                ui.add_space(10.0);
                ui.label(RichText::new(name).size(20.0).strong().color(TEXT_DARK));
                ui.label(RichText::new(role).size(14.0).strong().color(ACCENT_RED));
                ui.add_space(8.0);
                ui.label(RichText::new(bio).size(13.0).color(TEXT_BODY));
            });
        });
}

fn labeled_text_field(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    value: &mut String,
    multiline: bool,
) -> egui::Response {
    ui.label(RichText::new(label).strong().color(TEXT_LIGHT));
    ui.add_space(4.0);
    let width = ui.available_width();
    let response = if multiline {
        ui.add_sized(
            [width, 96.0],
            egui::TextEdit::multiline(value).hint_text(hint),
        )
    } else {
        ui.add_sized(
            [width, 32.0],
            egui::TextEdit::singleline(value).hint_text(hint),
        )
    };
    ui.add_space(10.0);
    response
}

fn contact_row(ui: &mut egui::Ui, icon: &str, label: &str, detail: &str) {
    ui.horizontal_top(|ui| {
        ui.label(RichText::new(icon).size(18.0));
        ui.vertical(|ui| {
            ui.label(RichText::new(label).strong().color(Color32::WHITE));
            ui.label(RichText::new(detail).size(13.0).color(TEXT_LIGHT));
        });
    });
    ui.add_space(10.0);
}

fn class_schedule(ui: &mut egui::Ui) {
    ui.label(
        RichText::new("Class Schedule")
            .size(22.0)
            .strong()
            .color(Color32::WHITE),
    );
    ui.add_space(14.0);
    for (index, (days, sessions)) in CLASS_SCHEDULE.iter().enumerate() {
        if index > 0 {
            ui.add_space(8.0);
        }
        schedule_card(ui, days, sessions);
    }
}

fn schedule_card(ui: &mut egui::Ui, title: &str, lines: &[&str]) {
    egui::Frame::new()
        .fill(CONTACT_CARD)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).strong().color(ACCENT_RED_SOFT));
            for line in lines {
                ui.label(RichText::new(*line).size(13.0).color(TEXT_LIGHT));
            }
        });
}

fn draw_photo_placeholder(ui: &mut egui::Ui, size: egui::Vec2) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, CornerRadius::same(8), PLACEHOLDER_FILL);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "No Image",
        egui::FontId::proportional(15.0),
        Color32::from_rgb(51, 51, 51),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_bar_switches_past_threshold() {
        assert!(!top_bar_is_opaque(0.0));
        assert!(!top_bar_is_opaque(50.0));
        assert!(top_bar_is_opaque(50.5));
    }

    #[test]
    fn grid_narrows_with_the_window() {
        assert_eq!(grid_columns_for_width(480.0), 1);
        assert_eq!(grid_columns_for_width(820.0), 2);
        assert_eq!(grid_columns_for_width(1280.0), 3);
    }

    #[test]
    fn form_requires_every_field() {
        assert!(!form_is_ready("", "", ""));
        assert!(!form_is_ready("Ana", "ana@example.com", ""));
        assert!(form_is_ready("Ana", "ana@example.com", "Hello"));
    }

    #[test]
    fn schedule_lists_sessions_per_class_level() {
        let (weekdays, weekday_sessions) = CLASS_SCHEDULE[0];
        assert_eq!(weekdays, "Monday - Friday");
        assert_eq!(
            weekday_sessions,
            [
                "6:00 PM - 7:30 PM (Beginner)",
                "7:30 PM - 9:00 PM (Intermediate)",
            ]
        );
        let (saturday, saturday_sessions) = CLASS_SCHEDULE[1];
        assert_eq!(saturday, "Saturday");
        assert_eq!(
            saturday_sessions,
            ["10:00 AM - 12:00 PM (Advanced)", "1:00 PM - 2:30 PM (Kids Class)"]
        );
        assert_eq!(CLASS_SCHEDULE[2], ("Sunday", &["Closed for Rest & Reflection"][..]));
    }

    #[test]
    fn instructor_roster_matches_site_copy() {
        let (_, name, role, bio) = INSTRUCTORS[0];
        assert_eq!(name, "Master Joseph");
        assert_eq!(role, "Head Instructor & Founder");
        assert!(bio.contains("over 25 years of experience"));
        let (_, name, role, bio) = INSTRUCTORS[1];
        assert_eq!(name, "Sensei Maria");
        assert_eq!(role, "Senior Instructor");
        assert!(bio.contains("15 years of experience"));
    }

    #[test]
    fn copyright_carries_the_year() {
        let line = footer_copyright(2026);
        assert!(line.starts_with("© 2026 Joseph Karate DOJO"));
        assert!(line.contains("Building Character Through Martial Arts"));
    }
}
