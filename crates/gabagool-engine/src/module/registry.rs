use std::panic::{self, AssertUnwindSafe};

use super::frame::{panic_message, FrameRegistry};
use crate::state::State;

/// Module entry point. Adds callbacks to the frame registry and may read or
/// write the shared state.
pub type ModuleInit = Box<dyn FnMut(&mut FrameRegistry, &mut State) -> anyhow::Result<()>>;

struct ModuleEntry {
    name: String,
    init: ModuleInit,
}

/// Outcome of one [`ModuleRegistry::run_all`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub succeeded: Vec<String>,
    /// Module name and rendered error.
    pub failed: Vec<(String, String)>,
}

impl InitReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ordered list of named module initializers, built during setup.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleEntry>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, init: F) -> &mut Self
    where
        F: FnMut(&mut FrameRegistry, &mut State) -> anyhow::Result<()> + 'static,
    {
        self.modules.push(ModuleEntry { name: name.into(), init: Box::new(init) });
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.name.as_str())
    }

    pub fn clear(&mut self) {
        self.modules.clear();
    }

    /// Runs every initializer in registration order against the same
    /// `frame` and `state`, so later modules see what earlier ones added.
    ///
    /// A module that errors or panics is rolled back: whatever it added to
    /// `frame` is removed and its cleanups run immediately. The remaining
    /// modules still run, and `frame` only holds successful work.
    pub fn run_all(&mut self, frame: &mut FrameRegistry, state: &mut State) -> InitReport {
        let mut report = InitReport::default();

        for entry in &mut self.modules {
            let mark = frame.mark();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (entry.init)(frame, state)));

            let error = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(format!("{e:#}")),
                Err(payload) => Some(format!("panicked: {}", panic_message(payload.as_ref()))),
            };

            match error {
                None => {
                    let added = frame.mark();
                    log::debug!(
                        "module '{}' registered {} pass(es), {} panel(s), {} cleanup(s)",
                        entry.name,
                        added.render_passes() - mark.render_passes(),
                        added.ui_panels() - mark.ui_panels(),
                        added.cleanups() - mark.cleanups()
                    );
                    report.succeeded.push(entry.name.clone());
                }
                Some(message) => {
                    log::error!("module '{}' failed to initialize: {message}", entry.name);
                    let released = frame.split_off(mark).run_cleanups();
                    if released > 0 {
                        log::debug!("module '{}': released {released} partial resource(s)", entry.name);
                    }
                    report.failed.push((entry.name.clone(), message));
                }
            }
        }

        log::info!(
            "initialized {}/{} module(s)",
            report.succeeded.len(),
            self.modules.len()
        );
        report
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use anyhow::bail;

    use super::*;

    #[test]
    fn runs_every_init_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut modules = ModuleRegistry::new();
        for name in ["one", "two", "three"] {
            let order = order.clone();
            modules.register(name, move |frame, _state| {
                order.borrow_mut().push(name);
                frame.add_ui_panel(|_, _| {});
                Ok(())
            });
        }

        let mut frame = FrameRegistry::new();
        let mut state = State::new();
        let report = modules.run_all(&mut frame, &mut state);

        assert_eq!(*order.borrow(), vec!["one", "two", "three"]);
        assert_eq!(report.succeeded, vec!["one", "two", "three"]);
        assert!(report.all_succeeded());
        assert_eq!(frame.ui_panel_count(), 3);
    }

    #[test]
    fn inits_share_state() {
        let mut modules = ModuleRegistry::new();
        modules
            .register("writer", |_, state| {
                state.display_debug = true;
                Ok(())
            })
            .register("reader", |_, state| {
                if !state.display_debug {
                    bail!("writer did not run first");
                }
                Ok(())
            });

        let mut frame = FrameRegistry::new();
        let mut state = State::new();
        assert!(modules.run_all(&mut frame, &mut state).all_succeeded());
    }

    #[test]
    fn later_init_sees_earlier_registrations() {
        let seen = Rc::new(Cell::new(usize::MAX));
        let mut modules = ModuleRegistry::new();
        let s = seen.clone();
        modules
            .register("first", |frame, _| {
                frame.add_ui_panel(|_, _| {});
                Ok(())
            })
            .register("second", move |frame, _| {
                s.set(frame.ui_panel_count());
                frame.add_ui_panel(|_, _| {});
                Ok(())
            });

        let mut frame = FrameRegistry::new();
        frame.add_ui_panel(|_, _| {});
        modules.run_all(&mut frame, &mut State::new());

        assert_eq!(seen.get(), 2);
        assert_eq!(frame.ui_panel_count(), 3);
    }

    #[test]
    fn failing_module_keeps_earlier_work() {
        let mut modules = ModuleRegistry::new();
        modules
            .register("ok", |frame, _| {
                frame.add_ui_panel(|_, _| {});
                Ok(())
            })
            .register("broken", |frame, _| {
                frame.add_ui_panel(|_, _| {});
                frame.add_render_pass(|_, _, _| {});
                bail!("late failure")
            });

        let mut frame = FrameRegistry::new();
        modules.run_all(&mut frame, &mut State::new());
        assert_eq!(frame.ui_panel_count(), 1);
        assert_eq!(frame.render_pass_count(), 0);
    }

    #[test]
    fn failing_module_does_not_block_others() {
        let mut modules = ModuleRegistry::new();
        modules
            .register("a", |frame, _| {
                frame.add_render_pass(|_, _, _| {});
                Ok(())
            })
            .register("broken", |frame, _| {
                frame.add_render_pass(|_, _, _| {});
                bail!("no shader for you")
            })
            .register("c", |frame, _| {
                frame.add_render_pass(|_, _, _| {});
                Ok(())
            });

        let mut frame = FrameRegistry::new();
        let mut state = State::new();
        let report = modules.run_all(&mut frame, &mut state);

        assert_eq!(report.succeeded, vec!["a", "c"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "broken");
        assert!(report.failed[0].1.contains("no shader for you"));
        assert_eq!(frame.render_pass_count(), 2);
    }

    #[test]
    fn panicking_module_is_contained() {
        let mut modules = ModuleRegistry::new();
        modules
            .register("boom", |_, _| panic!("kaboom"))
            .register("fine", |frame, _| {
                frame.add_cleanup(|| {});
                Ok(())
            });

        let mut frame = FrameRegistry::new();
        let mut state = State::new();
        let report = modules.run_all(&mut frame, &mut state);

        assert_eq!(report.succeeded, vec!["fine"]);
        assert!(report.failed[0].1.contains("kaboom"));
        assert_eq!(frame.cleanup_count(), 1);
    }

    #[test]
    fn partial_init_releases_its_own_cleanups() {
        let released = Rc::new(Cell::new(0));
        let mut modules = ModuleRegistry::new();
        let r = released.clone();
        modules.register("half", move |frame, _| {
            let r = r.clone();
            frame.add_cleanup(move || r.set(r.get() + 1));
            bail!("second resource failed")
        });

        let mut frame = FrameRegistry::new();
        let mut state = State::new();
        modules.run_all(&mut frame, &mut state);

        assert_eq!(released.get(), 1);
        assert_eq!(frame.cleanup_count(), 0);
    }

    #[test]
    fn clear_forgets_modules() {
        let mut modules = ModuleRegistry::new();
        modules.register("x", |_, _| Ok(()));
        assert_eq!(modules.names().collect::<Vec<_>>(), vec!["x"]);

        modules.clear();
        assert!(modules.is_empty());
        let report = modules.run_all(&mut FrameRegistry::new(), &mut State::new());
        assert!(report.succeeded.is_empty());
    }
}
