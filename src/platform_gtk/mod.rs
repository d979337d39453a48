use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::TimelineEngine;
use crate::core::Viewport;
use crate::interaction::WheelDeltaMode;
use crate::render::CairoRenderer;

pub type SharedTimelineEngine = Rc<RefCell<TimelineEngine<CairoRenderer>>>;

/// Binds a timeline engine to a `gtk::DrawingArea`.
///
/// The draw func renders through the widget's cairo context; motion, scroll,
/// drag and click controllers feed the engine's pointer API and queue a
/// redraw after every event.
pub struct GtkTimelineAdapter {
    drawing_area: gtk::DrawingArea,
    engine: SharedTimelineEngine,
}

impl GtkTimelineAdapter {
    #[must_use]
    pub fn new(engine: TimelineEngine<CairoRenderer>) -> Self {
        let engine = Rc::new(RefCell::new(engine));
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);
        drawing_area.set_focusable(true);

        attach_draw_func(&drawing_area, Rc::clone(&engine));
        attach_pointer_controllers(&drawing_area, Rc::clone(&engine));

        Self {
            drawing_area,
            engine,
        }
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn engine(&self) -> SharedTimelineEngine {
        Rc::clone(&self.engine)
    }
}

fn attach_draw_func(drawing_area: &gtk::DrawingArea, engine: SharedTimelineEngine) {
    drawing_area.set_draw_func(move |_widget, context, width, height| {
        if width <= 0 || height <= 0 {
            return;
        }
        let Ok(mut timeline) = engine.try_borrow_mut() else {
            return;
        };

        let viewport = Viewport::new(width as u32, height as u32);
        if timeline.viewport() != viewport {
            if let Err(err) = timeline.set_viewport(viewport) {
                warn!(error = %err, width, height, "skipping draw for unusable surface size");
                return;
            }
        }
        if let Err(err) = timeline.render_on_cairo_context(context) {
            warn!(error = %err, "timeline draw failed");
        }
    });
}

fn attach_pointer_controllers(drawing_area: &gtk::DrawingArea, engine: SharedTimelineEngine) {
    let pointer = Rc::new(Cell::new((0.0_f64, 0.0_f64)));

    let motion = gtk::EventControllerMotion::new();
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        let pointer = Rc::clone(&pointer);
        motion.connect_motion(move |_, x, y| {
            pointer.set((x, y));
            if let Ok(mut timeline) = engine.try_borrow_mut() {
                if let Err(err) = timeline.pointer_move(x, y) {
                    warn!(error = %err, "pointer move rejected");
                }
            }
            drawing_area.queue_draw();
        });
    }
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        motion.connect_leave(move |_| {
            if let Ok(mut timeline) = engine.try_borrow_mut() {
                timeline.pointer_leave();
            }
            drawing_area.queue_draw();
        });
    }
    drawing_area.add_controller(motion);

    let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        let pointer = Rc::clone(&pointer);
        scroll.connect_scroll(move |_, _dx, dy| {
            let (x, y) = pointer.get();
            if let Ok(mut timeline) = engine.try_borrow_mut() {
                if let Err(err) = timeline.wheel(x, y, dy, WheelDeltaMode::Line) {
                    warn!(error = %err, "wheel input rejected");
                }
            }
            drawing_area.queue_draw();
            gtk::glib::Propagation::Stop
        });
    }
    drawing_area.add_controller(scroll);

    let drag = gtk::GestureDrag::new();
    {
        let engine = Rc::clone(&engine);
        drag.connect_drag_begin(move |_, start_x, start_y| {
            if let Ok(mut timeline) = engine.try_borrow_mut() {
                if let Err(err) = timeline.pointer_down(start_x, start_y) {
                    warn!(error = %err, "pointer down rejected");
                }
            }
        });
    }
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            if let Ok(mut timeline) = engine.try_borrow_mut() {
                if let Err(err) = timeline.pointer_move(start_x + offset_x, start_y + offset_y) {
                    warn!(error = %err, "drag update rejected");
                }
            }
            drawing_area.queue_draw();
        });
    }
    {
        let engine = Rc::clone(&engine);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_end(move |_, _, _| {
            if let Ok(mut timeline) = engine.try_borrow_mut() {
                timeline.pointer_up();
            }
            drawing_area.queue_draw();
        });
    }
    drawing_area.add_controller(drag);

    let click = gtk::GestureClick::new();
    {
        let drawing_area = drawing_area.clone();
        click.connect_released(move |_, n_press, x, y| {
            if let Ok(mut timeline) = engine.try_borrow_mut() {
                let result = if n_press >= 2 {
                    timeline.double_click(x, y).map(|_| ())
                } else {
                    timeline.click(x, y).map(|_| ())
                };
                if let Err(err) = result {
                    warn!(error = %err, "click rejected");
                }
            }
            drawing_area.queue_draw();
        });
    }
    drawing_area.add_controller(click);
}
