//! Dashboard window: filter bar, country list, map and the active chart

use eframe::egui::{self, Align2, Color32, Context, RichText, Sense, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Text};

use gm_core::{Category, ChartType, YearFilter};
use gm_views::plots::utils::format_value;
use gm_views::plots::{BarRender, LineRender, MapLegend};
use gm_views::{Dashboard, MapView, RenderInstructions};

use crate::map_painter::{MapPainter, Projection};

/// User input gathered while drawing, applied once the frame is drawn
enum Action {
    Year(YearFilter),
    Category(Category),
    Chart(ChartType),
    Toggle(String),
    ClickMap(f64, f64),
    Clear,
}

pub struct MedalsApp {
    dashboard: Dashboard,
    map_painter: MapPainter,
}

impl MedalsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dashboard: Dashboard) -> Self {
        let map_painter = MapPainter::new(dashboard.geometry());
        Self { dashboard, map_painter }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Year(year) => {
                self.dashboard.set_year_filter(year);
            }
            Action::Category(category) => {
                self.dashboard.set_category(category);
            }
            Action::Chart(chart) => {
                self.dashboard.set_chart_type(chart);
            }
            Action::Toggle(code) => {
                self.dashboard.toggle_country(&code);
            }
            Action::ClickMap(lon, lat) => {
                self.dashboard.click_map(lon, lat);
            }
            Action::Clear => self.dashboard.clear_selection(),
        }
    }

    fn filter_bar(&self, ui: &mut Ui, actions: &mut Vec<Action>) {
        let filters = self.dashboard.filters();

        ui.horizontal(|ui| {
            let mut year = filters.year;
            egui::ComboBox::from_label("Year")
                .selected_text(year.label())
                .show_ui(ui, |ui| {
                    for option in YearFilter::options() {
                        ui.selectable_value(&mut year, option, option.label());
                    }
                });
            if year != filters.year {
                actions.push(Action::Year(year));
            }

            let mut category = filters.category;
            egui::ComboBox::from_label("Medal")
                .selected_text(category.name())
                .show_ui(ui, |ui| {
                    for option in Category::ALL {
                        ui.selectable_value(&mut category, option, option.name());
                    }
                });
            if category != filters.category {
                actions.push(Action::Category(category));
            }

            ui.separator();
            for chart in [ChartType::Bar, ChartType::Line] {
                if ui.selectable_label(filters.chart == chart, chart.to_string()).clicked() {
                    actions.push(Action::Chart(chart));
                }
            }

            ui.separator();
            let selected = self.dashboard.selection().len();
            if ui
                .add_enabled(selected > 0, egui::Button::new(format!("Clear selection ({selected})")))
                .clicked()
            {
                actions.push(Action::Clear);
            }
        });
    }

    fn country_list(&self, ui: &mut Ui, actions: &mut Vec<Action>) {
        ui.heading("Countries");
        egui::ScrollArea::vertical().show(ui, |ui| {
            for item in &self.dashboard.frame().map.country_list {
                let mut text = RichText::new(&item.name);
                if let Some(color) = item.color {
                    text = text.color(color).strong();
                }
                if ui.selectable_label(item.selected, text).clicked() {
                    actions.push(Action::Toggle(item.code.clone()));
                }
            }
        });
    }

    fn map(&self, ui: &mut Ui, actions: &mut Vec<Action>) {
        let size = egui::vec2(ui.available_width(), ui.available_height() * 0.55);
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let projection = Projection::fit(response.rect);
        let render = &self.dashboard.frame().map;

        self.map_painter.paint(&painter, &projection, render);
        Self::legend(&painter, response.rect, &render.legend);

        if response.clicked() {
            if let Some((lon, lat)) = response.interact_pointer_pos().and_then(|p| projection.unproject(p)) {
                actions.push(Action::ClickMap(lon, lat));
            }
        }

        let hovered = response
            .hover_pos()
            .and_then(|p| projection.unproject(p))
            .and_then(|(lon, lat)| MapView::country_at(self.dashboard.geometry(), lon, lat))
            .and_then(|code| render.countries.iter().find(|c| c.code == code));
        if let Some(country) = hovered {
            let value = if country.has_data {
                format_value(country.value)
            } else {
                "no data".to_string()
            };
            response.on_hover_text(format!("{}: {}", country.name, value));
        }
    }

    fn legend(painter: &egui::Painter, rect: egui::Rect, legend: &MapLegend) {
        let width = 200.0;
        let origin = rect.left_bottom() + egui::vec2(12.0, -28.0);
        let step = width / legend.stops.len().max(1) as f32;

        for (i, (_, color)) in legend.stops.iter().enumerate() {
            let min = origin + egui::vec2(i as f32 * step, 0.0);
            painter.rect_filled(egui::Rect::from_min_size(min, egui::vec2(step, 10.0)), 0.0, *color);
        }

        let font = egui::FontId::proportional(11.0);
        painter.text(origin + egui::vec2(0.0, 12.0), Align2::LEFT_TOP, format_value(legend.min), font.clone(), Color32::DARK_GRAY);
        painter.text(origin + egui::vec2(width, 12.0), Align2::RIGHT_TOP, format_value(legend.max), font, Color32::DARK_GRAY);
    }

    fn bar_chart(ui: &mut Ui, render: &BarRender) {
        if render.bars.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No medals for this selection").weak());
            });
            return;
        }

        let count = render.bars.len();
        Plot::new("medal_bars")
            .x_axis_label(render.value_label.as_str())
            .y_axis_label(render.category_label.as_str())
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(0.0)
            .include_x(render.x_domain.1 as f64 * 1.15)
            .show(ui, |plot_ui| {
                // first-ranked bar at the top
                let bars: Vec<Bar> = render
                    .bars
                    .iter()
                    .enumerate()
                    .map(|(i, bar)| {
                        Bar::new((count - 1 - i) as f64, bar.value as f64)
                            .name(&bar.name)
                            .fill(bar.fill)
                            .width(0.7)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).horizontal());

                for (i, bar) in render.bars.iter().enumerate() {
                    let position = PlotPoint::new(bar.value as f64, (count - 1 - i) as f64);
                    plot_ui.text(Text::new(position, format!(" {} {}", bar.name, bar.label)).anchor(Align2::LEFT_CENTER));
                }
            });
    }

    fn line_chart(&self, ui: &mut Ui, render: &LineRender) {
        let response = Plot::new("medal_lines")
            .legend(Legend::default())
            .x_axis_label("Year")
            .y_axis_label(render.y_label.as_str())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(f64::from(render.x_domain.0.get()))
            .include_x(f64::from(render.x_domain.1.get()))
            .include_y(0.0)
            .include_y(render.y_domain.1 as f64)
            .show(ui, |plot_ui| {
                for series in &render.series {
                    let points: PlotPoints = series
                        .points
                        .iter()
                        .map(|p| [f64::from(p.year.get()), p.value as f64])
                        .collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(series.color)
                            .width(render.line_width)
                            .name(&series.name),
                    );
                }
                plot_ui.pointer_coordinate().map(|p| p.x)
            });

        if let Some(readout) = response.inner.and_then(|year| self.dashboard.line_hover(year)) {
            egui::show_tooltip_at_pointer(ui.ctx(), egui::Id::new("medal_line_hover"), |ui| {
                ui.strong(readout.year.to_string());
                for entry in &readout.entries {
                    ui.label(RichText::new(format!("{}: {}", entry.name, entry.formatted)).color(entry.color));
                }
            });
        }
    }
}

impl eframe::App for MedalsApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("filters").show(ctx, |ui| {
            self.filter_bar(ui, &mut actions);
        });

        egui::SidePanel::left("countries")
            .default_width(200.0)
            .show(ctx, |ui| {
                self.country_list(ui, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.map(ui, &mut actions);
            ui.separator();
            match &self.dashboard.frame().chart {
                RenderInstructions::Bar(render) => Self::bar_chart(ui, render),
                RenderInstructions::Line(render) => self.line_chart(ui, render),
                RenderInstructions::Map(_) => {}
            }
        });

        for action in actions {
            self.apply(action);
        }
    }
}
