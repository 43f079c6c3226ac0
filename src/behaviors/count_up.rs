//! Counts statistic numbers up from zero once they scroll into view.
//!
//! The target and the suffix of every stat are read from its initial text. Activation
//! happens once per page load, when the first stat intersects the viewport; later entries
//! into view do nothing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::Result;
use crate::animation::{AnimationHandle, FrameAnimation};
use crate::app::InitGuard;
use crate::config::CountUpConfig;
use crate::dom::NodeId;
use crate::page::{EventTarget, Page};
use crate::rate_limit::Throttled;
use crate::validation::is_space;

pub struct CountUp {
    guard: InitGuard,
    config: Rc<CountUpConfig>,
}

struct StatTarget {
    node: NodeId,
    target: f64,
    suffix: String,
}

struct Counter {
    stats: Vec<StatTarget>,
    animated: Cell<bool>,
    animations: RefCell<Vec<AnimationHandle>>,
    config: Rc<CountUpConfig>,
}

impl Counter {
    fn check_position(self: &Rc<Self>, page: &mut Page) -> Result<()> {
        if self.animated.get() {
            return Ok(());
        }
        let Some(first) = self.stats.first() else {
            return Ok(());
        };
        let rect = page.bounding_client_rect(first.node);
        if rect.top < page.inner_height() && rect.bottom() > 0.0 {
            self.activate(page)?;
        }
        Ok(())
    }

    fn activate(self: &Rc<Self>, page: &mut Page) -> Result<()> {
        self.animated.set(true);
        tracing::debug!(stats = self.stats.len(), "stats visible; counting up");
        for (index, stat) in self.stats.iter().enumerate() {
            let dom = page.dom_mut();
            dom.set_attr(stat.node, "data-suffix", &stat.suffix)?;
            dom.set_text_content(stat.node, &format!("0{}", stat.suffix))?;

            let counter = Rc::clone(self);
            let delay = index as i64 * self.config.stagger_ms;
            page.set_timeout(delay, move |page| {
                counter.start(page, index);
                Ok(())
            });
        }
        Ok(())
    }

    fn start(&self, page: &mut Page, index: usize) {
        let Some(stat) = self.stats.get(index) else {
            return;
        };
        let (node, target, suffix) = (stat.node, stat.target, stat.suffix.clone());
        let handle = FrameAnimation::start(page, self.config.duration_ms, move |page, progress| {
            // `+ 0.0` turns the -0 of a negative target at progress 0 into 0.
            let value = (progress * target).floor() + 0.0;
            page.dom_mut()
                .set_text_content(node, &format!("{value}{suffix}"))
        });
        self.animations.borrow_mut().push(handle);
    }
}

impl CountUp {
    pub fn new(config: Rc<CountUpConfig>) -> Self {
        Self {
            guard: InitGuard::new("count_up"),
            config,
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }
        let nodes = page.query_selector_all(&self.config.stats)?;
        if nodes.is_empty() {
            tracing::debug!(selector = %self.config.stats, "no stats; count-up disabled");
            return Ok(());
        }

        let stats = nodes
            .into_iter()
            .map(|node| {
                let text = page.dom().text_content(node);
                StatTarget {
                    node,
                    target: parse_leading_int(&text),
                    suffix: strip_digits(&text),
                }
            })
            .collect();
        let counter = Rc::new(Counter {
            stats,
            animated: Cell::new(false),
            animations: RefCell::new(Vec::new()),
            config: Rc::clone(&self.config),
        });

        let c = Rc::clone(&counter);
        let on_scroll = Throttled::new(self.config.throttle_ms, move |page: &mut Page| {
            c.check_position(page)
        });
        page.add_event_listener(EventTarget::Window, "scroll", move |page, _| {
            on_scroll.trigger(page)?;
            Ok(())
        });
        counter.check_position(page)
    }
}

/// Leading integer the way `parseInt` reads it: optional whitespace and sign, then
/// decimal digits. Anything else yields `0`. Long digit runs lose precision, not magnitude.
fn parse_leading_int(text: &str) -> f64 {
    let trimmed = text.trim_start_matches(is_space);
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let magnitude = rest[..digits_len].parse::<f64>().unwrap_or(0.0);
    if negative { -magnitude } else { magnitude }
}

fn strip_digits(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_digit()).collect()
}
