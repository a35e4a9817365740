//! Application shell: wires the data provider, local store, drag
//! controller, mutation coordinator and toast surface together around the
//! day strip.

use chrono::{Datelike, Duration, Local, NaiveDate};

use super::day_strip;
use super::toast::ToastManager;
use crate::interaction::drag::{DragController, DragOutcome};
use crate::layout::coordinates::CoordinateMapper;
use crate::models::event::{external_event_id, task_event_id, Event, EventSource};
use crate::models::interval::TimeInterval;
use crate::services::mutation::gateway::{InstantGateway, PersistGateway};
use crate::services::mutation::{MutationCoordinator, ResolveOutcome, UndoOutcome};
use crate::services::provider::{CalendarDataProvider, StaticProvider};
use crate::services::settings::CalendarSettings;
use crate::services::store::MemoryEventStore;

pub struct CalendarApp {
    provider: Box<dyn CalendarDataProvider>,
    gateway: Box<dyn PersistGateway>,
    store: MemoryEventStore,
    coordinator: MutationCoordinator,
    drag: DragController,
    toasts: ToastManager,
    settings: CalendarSettings,
    mapper: CoordinateMapper,
    current_date: NaiveDate,
    selected_event: Option<String>,
    scroll_offset: f32,
    loaded_range: Option<(NaiveDate, NaiveDate)>,
}

impl CalendarApp {
    pub fn new(
        provider: Box<dyn CalendarDataProvider>,
        gateway: Box<dyn PersistGateway>,
    ) -> Self {
        let settings = CalendarSettings::default_path()
            .and_then(|path| CalendarSettings::load_from(&path))
            .unwrap_or_else(|error| {
                log::warn!("falling back to default settings: {}", error);
                CalendarSettings::default()
            });

        Self {
            provider,
            gateway,
            store: MemoryEventStore::new(),
            coordinator: MutationCoordinator::new(),
            drag: DragController::new(),
            toasts: ToastManager::new(),
            mapper: CoordinateMapper::new(settings.pixels_per_hour),
            settings,
            current_date: Local::now().date_naive(),
            selected_event: None,
            scroll_offset: 0.0,
            loaded_range: None,
        }
    }

    /// App over a canned set of quests; used by the demo binary.
    pub fn with_demo_data() -> Self {
        let today = Local::now().date_naive();
        let at = |hour: u32, minute: u32| {
            today
                .and_hms_opt(hour, minute, 0)
                .unwrap()
                .and_local_timezone(Local)
                .unwrap()
        };

        let events = vec![
            Event::new(task_event_id(1), "Clear the inbox", at(9, 0), at(9, 30)).unwrap(),
            Event::builder()
                .id(task_event_id(2))
                .title("Write weekly report")
                .start(at(9, 15))
                .end(at(9, 45))
                .color("#7B5AC5")
                .importance("high")
                .build()
                .unwrap(),
            Event::builder()
                .id(task_event_id(3))
                .title("Morning run")
                .start(at(7, 0))
                .end(at(7, 45))
                .completed(true)
                .color("#3C8C50")
                .build()
                .unwrap(),
            Event::builder()
                .id(external_event_id("google", "dentist-2291"))
                .title("Dentist")
                .start(at(14, 0))
                .end(at(15, 0))
                .source(EventSource::External)
                .color("#B05050")
                .build()
                .unwrap(),
        ];

        Self::new(
            Box::new(StaticProvider::new(events)),
            Box::new(InstantGateway::new()),
        )
    }

    /// Fetch the visible month into the local cache if not already loaded.
    fn ensure_range_loaded(&mut self) {
        let from = self.current_date.with_day(1).unwrap_or(self.current_date);
        let to = (from + Duration::days(32)).with_day(1).unwrap_or(from) - Duration::days(1);

        if self.loaded_range == Some((from, to)) {
            return;
        }

        match self.provider.fetch_events(from, to) {
            Ok(events) => {
                log::info!("loaded {} events for {} .. {}", events.len(), from, to);
                self.store.set_events(events);
                self.loaded_range = Some((from, to));
            }
            Err(error) => {
                log::error!("failed to load events: {:#}", error);
                self.toasts.error("Could not load calendar events");
                // Remember the attempt so a dead provider is not hammered
                // every frame.
                self.loaded_range = Some((from, to));
            }
        }
    }

    /// Feed completed persistence calls back into the coordinator.
    fn process_completions(&mut self) {
        for (ticket, result) in self.gateway.poll() {
            match self.coordinator.resolve(&mut self.store, ticket, result) {
                ResolveOutcome::RolledBack { .. } => {
                    self.toasts
                        .error("Could not save reschedule; previous time restored");
                }
                ResolveOutcome::UndoFailed { .. } => {
                    self.toasts.warning("Undo was not saved to the server");
                }
                ResolveOutcome::Confirmed
                | ResolveOutcome::Superseded
                | ResolveOutcome::Unknown => {}
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        // Escape clears selection only; an in-progress drag is deliberately
        // left alone.
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.selected_event = None;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Z)) && !self.drag.is_active() {
            self.request_undo();
        }
    }

    fn request_undo(&mut self) {
        match self.coordinator.undo(&mut self.store) {
            Ok(UndoOutcome::NothingToUndo) => self.toasts.info("Nothing to undo"),
            Ok(UndoOutcome::Reverted(pending)) => {
                self.gateway.dispatch(pending);
                self.toasts.success("Reschedule undone");
            }
            Err(error) => self.toasts.error(error.to_string()),
        }
    }

    fn apply_commit(&mut self, event_id: &str, tentative: TimeInterval) {
        match self.coordinator.commit(&mut self.store, event_id, tentative) {
            Ok(pending) => {
                let when = pending.update.scheduled_start.format("%H:%M");
                self.gateway.dispatch(pending.clone());
                self.toasts
                    .success(format!("Rescheduled to {} (Z to undo)", when));
            }
            Err(error) => self.toasts.error(error.to_string()),
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("calendar_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    self.current_date -= Duration::days(1);
                }
                if ui.button("Today").clicked() {
                    self.current_date = Local::now().date_naive();
                }
                if ui.button("▶").clicked() {
                    self.current_date += Duration::days(1);
                }
                ui.label(
                    egui::RichText::new(self.current_date.format("%A, %-d %B %Y").to_string())
                        .strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let undo = ui.add_enabled(
                        self.coordinator.can_undo(),
                        egui::Button::new("Undo"),
                    );
                    if undo.clicked() {
                        self.request_undo();
                    }
                });
            });
        });
    }
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_completions();
        self.handle_keys(ctx);
        self.ensure_range_loaded();
        self.render_top_bar(ctx);

        // Apply this frame's auto-scroll nudge before the scroll area is
        // laid out, so the compensation math sees the new offset.
        let nudge = self.drag.autoscroll_tick();
        if nudge != 0.0 {
            self.scroll_offset = (self.scroll_offset + nudge).max(0.0);
            ctx.request_repaint();
        }

        let mut events: Vec<Event> = self
            .store
            .events_on(self.current_date)
            .into_iter()
            .cloned()
            .collect();
        if !self.settings.show_completed {
            events.retain(|event| !event.completed);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut area = egui::ScrollArea::vertical().id_source("day_strip_scroll");
            if nudge != 0.0 {
                area = area.vertical_scroll_offset(self.scroll_offset);
            }

            let output = area.show(ui, |ui| {
                day_strip::show(
                    ui,
                    self.current_date,
                    &events,
                    &self.mapper,
                    &mut self.drag,
                    self.selected_event.as_deref(),
                    self.scroll_offset,
                )
            });
            self.scroll_offset = output.state.offset.y;

            let strip = output.inner;
            if let Some(event_id) = strip.clicked {
                log::info!("open detail view for {}", event_id);
                self.selected_event = Some(event_id);
            }
            match strip.outcome {
                Some(DragOutcome::Click { event_id }) => {
                    log::info!("open detail view for {}", event_id);
                    self.selected_event = Some(event_id);
                }
                Some(DragOutcome::Commit {
                    event_id,
                    tentative,
                    ..
                }) => self.apply_commit(&event_id, tentative),
                None => {}
            }
        });

        self.toasts.render(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Ok(path) = CalendarSettings::default_path() {
            if let Err(error) = self.settings.save_to(&path) {
                log::warn!("failed to save settings: {:#}", error);
            }
        }
    }
}
