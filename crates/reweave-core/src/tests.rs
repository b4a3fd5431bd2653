#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_time::Duration;

    use crate::clock::{TestClock, set_clock};
    use crate::context::{Context, Lifecycle};
    use crate::error::HookError;
    use crate::events::Listeners;
    use crate::guards::SameValue;
    use crate::hooks::*;
    use crate::scheduler::{Tick, clear_defer, set_defer};
    use crate::wrap::{Wrapped, auto_wrap, wrap};
    use crate::guards;

    /// The k-th state hook addresses the k-th slot on every call, so two
    /// interleaved slots evolve independently.
    #[test]
    fn test_state_slots_evolve_independently() {
        let f = wrap(|(): ()| -> Result<(i32, String), HookError> {
            let (x, set_x) = use_state(|| 0)?;
            let (s, set_s) = use_state(|| String::from("a"))?;
            set_x.update(|n| n + 1);
            set_s.update(|s| format!("{s}a"));
            Ok((x, s))
        });

        let cx = f.call(()).unwrap();
        let cx = f.resume(&cx, ()).unwrap();
        let cx = f.resume(&cx, ()).unwrap();

        let (x, s) = (*cx.return_value::<(i32, String)>().unwrap()).clone();
        assert_eq!(x, 2);
        assert_eq!(s, "aaa");
    }

    #[test]
    fn test_counter_sequence() {
        let f = wrap(|(): ()| -> Result<i32, HookError> {
            let (x, set) = use_state(|| -2)?;
            let x = x + 3;
            set.set(x);
            Ok(x)
        });

        let cx = f.call(()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 1);
        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 4);
        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 7);
    }

    #[test]
    fn test_lazy_initializer_runs_once() {
        let inits = Rc::new(RefCell::new(0));
        let f = {
            let inits = inits.clone();
            wrap(move |(): ()| -> Result<i32, HookError> {
                let inits = inits.clone();
                let (x, set) = use_state(move || {
                    *inits.borrow_mut() += 1;
                    0
                })?;
                set.set(x + 1);
                Ok(x)
            })
        };

        let cx = f.call(()).unwrap();
        let _ = f.resume(&cx, ()).unwrap();
        assert_eq!(*inits.borrow(), 1);
    }

    /// A plain helper called from inside a body consumes the caller's slots,
    /// whichever wrapped function that is.
    #[test]
    fn test_custom_hook_delegates_to_caller_context() {
        fn bump(seed: i32) -> Result<i32, HookError> {
            let (y, set) = use_state(move || seed)?;
            let y = y + 2;
            set.set(y);
            Ok(y)
        }

        let foo = wrap(|(): ()| -> Result<(i32, i32), HookError> {
            let (x, set) = use_state(|| -1)?;
            let x = x + 2;
            set.set(x);
            let y = bump(0)?;
            Ok((x, y))
        });
        let bar = wrap(|(): ()| -> Result<(i32, i32), HookError> {
            let (x, set) = use_state(|| 9)?;
            let x = x + 2;
            set.set(x);
            let y = bump(10)?;
            Ok((x, y))
        });

        let foo_cx = foo.call(()).unwrap();
        let bar_cx = bar.call(()).unwrap();
        assert_eq!(*foo_cx.return_value::<(i32, i32)>().unwrap(), (1, 2));
        assert_eq!(*bar_cx.return_value::<(i32, i32)>().unwrap(), (11, 12));

        let foo_cx = foo.resume(&foo_cx, ()).unwrap();
        let bar_cx = bar.resume(&bar_cx, ()).unwrap();
        assert_eq!(*foo_cx.return_value::<(i32, i32)>().unwrap(), (3, 4));
        assert_eq!(*bar_cx.return_value::<(i32, i32)>().unwrap(), (13, 14));
    }

    /// A wrapped function called from another body pushes its own context;
    /// it neither consumes the outer slots nor persists without its own
    /// lineage being threaded.
    #[test]
    fn test_nested_wrapped_call_gets_own_context() {
        let inner = wrap(|(): ()| -> Result<i32, HookError> {
            let (n, set) = use_state(|| 100)?;
            set.set(n + 5);
            Ok(n)
        });
        let outer = {
            let inner = inner.clone();
            wrap(move |(): ()| -> Result<(i32, i32), HookError> {
                let (x, set) = use_state(|| 0)?;
                set.set(x + 1);
                let z = *inner.call(())?.return_value::<i32>().unwrap();
                Ok((x, z))
            })
        };

        let cx = outer.call(()).unwrap();
        assert_eq!(*cx.return_value::<(i32, i32)>().unwrap(), (0, 100));
        let cx = outer.resume(&cx, ()).unwrap();
        assert_eq!(*cx.return_value::<(i32, i32)>().unwrap(), (1, 100));
    }

    #[test]
    fn test_hooks_outside_context_fail() {
        assert!(matches!(use_state(|| 0), Err(HookError::NoActiveContext)));
        assert!(matches!(
            use_effect(|| ()),
            Err(HookError::NoActiveContext)
        ));
        assert!(matches!(
            use_memo(|| 0),
            Err(HookError::NoActiveContext)
        ));
    }

    #[test]
    fn test_effect_without_guards_requeues_every_call() {
        let runs = Rc::new(RefCell::new(0));
        let f = {
            let runs = runs.clone();
            wrap(move |(): ()| -> Result<(), HookError> {
                let runs = runs.clone();
                use_effect(move || {
                    *runs.borrow_mut() += 1;
                })?;
                Ok(())
            })
        };

        let cx = f.call(()).unwrap();
        assert_eq!(cx.state(), Lifecycle::Pending);
        assert_eq!(*runs.borrow(), 0);
        cx.effects().unwrap();
        assert_eq!(cx.state(), Lifecycle::Ready);
        assert_eq!(*runs.borrow(), 1);

        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(cx.state(), Lifecycle::Pending);
        cx.effects().unwrap();
        assert_eq!(*runs.borrow(), 2);
    }

    #[test]
    fn test_effect_with_empty_guards_runs_once() {
        let runs = Rc::new(RefCell::new(0));
        let f = {
            let runs = runs.clone();
            wrap(move |(): ()| -> Result<(), HookError> {
                let runs = runs.clone();
                use_effect_with(guards![], move || {
                    *runs.borrow_mut() += 1;
                })?;
                Ok(())
            })
        };

        let cx = f.call(()).unwrap();
        cx.effects().unwrap();
        assert_eq!(*runs.borrow(), 1);

        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(cx.state(), Lifecycle::Ready);
        assert!(matches!(cx.effects(), Err(HookError::NoPendingEffects)));
        assert_eq!(*runs.borrow(), 1);
    }

    /// Same-value comparison: `0.0` and `-0.0` differ, every NaN equals
    /// every other NaN.
    #[test]
    fn test_effect_guard_same_value_semantics() {
        let runs = Rc::new(RefCell::new(0));
        let f = {
            let runs = runs.clone();
            wrap(move |guard: f64| -> Result<(), HookError> {
                let runs = runs.clone();
                use_effect_with(guards![guard], move || {
                    *runs.borrow_mut() += 1;
                })?;
                Ok(())
            })
        };

        let cx = f.call(0.0).unwrap();
        cx.effects().unwrap();
        assert_eq!(*runs.borrow(), 1);

        let cx = f.resume(&cx, -0.0).unwrap();
        cx.effects().unwrap();
        assert_eq!(*runs.borrow(), 2);

        let cx = f.resume(&cx, -0.0).unwrap();
        assert_eq!(cx.state(), Lifecycle::Ready);

        let cx = f.resume(&cx, f64::NAN).unwrap();
        cx.effects().unwrap();
        assert_eq!(*runs.borrow(), 3);

        let cx = f.resume(&cx, f64::NAN).unwrap();
        assert_eq!(cx.state(), Lifecycle::Ready);
    }

    #[test]
    fn test_same_value_basics() {
        assert!(0.0f64.same_value(&0.0));
        assert!(!0.0f64.same_value(&-0.0));
        assert!(f64::NAN.same_value(&f64::NAN));
        let a = Rc::new(1);
        let b = a.clone();
        assert!(a.same_value(&b));
        assert!(!a.same_value(&Rc::new(1)));
    }

    #[test]
    fn test_cleanup_runs_before_effect_rerun() {
        let order = Rc::new(RefCell::new(Vec::<String>::new()));
        let f = {
            let order = order.clone();
            wrap(move |n: i32| -> Result<(), HookError> {
                let order = order.clone();
                use_effect_with(guards![n], move || {
                    order.borrow_mut().push(format!("effect {n}"));
                    let order = order.clone();
                    on_cleanup(move || order.borrow_mut().push(format!("cleanup {n}")))
                })?;
                Ok(())
            })
        };

        let cx = f.call(1).unwrap();
        cx.effects().unwrap();
        let cx = f.resume(&cx, 2).unwrap();
        cx.effects().unwrap();

        assert_eq!(
            *order.borrow(),
            vec!["effect 1", "cleanup 1", "effect 2"]
        );
    }

    #[test]
    fn test_reset_runs_cleanups_in_order_once() {
        let order = Rc::new(RefCell::new(Vec::<&'static str>::new()));
        let f = {
            let order = order.clone();
            wrap(move |(): ()| -> Result<(), HookError> {
                let a = order.clone();
                use_effect_with(guards![], move || {
                    let a = a.clone();
                    on_cleanup(move || a.borrow_mut().push("first"))
                })?;
                let b = order.clone();
                use_effect_with(guards![], move || {
                    let b = b.clone();
                    on_cleanup(move || b.borrow_mut().push("second"))
                })?;
                Ok(())
            })
        };

        let cx = f.call(()).unwrap();
        cx.effects().unwrap();
        assert!(order.borrow().is_empty());

        cx.reset().unwrap();
        assert_eq!(cx.state(), Lifecycle::Open);
        assert_eq!(*order.borrow(), vec!["first", "second"]);

        // Idempotent: the second reset has nothing left to do.
        cx.reset().unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_reset_reopens_shape_and_state() {
        let f = wrap(|(): ()| -> Result<i32, HookError> {
            let (x, set) = use_state(|| -2)?;
            let x = x + 3;
            set.set(x);
            Ok(x)
        });

        let cx = f.call(()).unwrap();
        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 4);

        cx.reset().unwrap();
        assert!(cx.return_value::<i32>().is_none());
        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 1);
    }

    #[test]
    fn test_clone_forks_independent_state() {
        let f = wrap(|(): ()| -> Result<i32, HookError> {
            let (x, set) = use_state(|| -2)?;
            let x = x + 3;
            set.set(x);
            Ok(x)
        });

        let cx = f.call(()).unwrap();
        let fork = cx.clone().unwrap();
        assert_eq!(fork.state(), Lifecycle::Ready);

        let cx = f.resume(&cx, ()).unwrap();
        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 7);

        // The fork starts from the cloned value and evolves on its own.
        let fork = f.resume(&fork, ()).unwrap();
        assert_eq!(*fork.return_value::<i32>().unwrap(), 4);
        assert_eq!(*cx.return_value::<i32>().unwrap(), 7);
    }

    #[test]
    fn test_clone_requires_ready() {
        let f = wrap(|(): ()| -> Result<(), HookError> {
            use_effect(|| ())?;
            Ok(())
        });
        let cx = f.call(()).unwrap();
        assert_eq!(cx.state(), Lifecycle::Pending);
        assert!(matches!(cx.clone(), Err(HookError::ContextNotCloneable)));
        cx.effects().unwrap();
        assert!(cx.clone().is_ok());
    }

    #[test]
    fn test_context_ownership_enforced() {
        let a = wrap(|(): ()| -> Result<(), HookError> { Ok(()) });
        let b = wrap(|(): ()| -> Result<(), HookError> { Ok(()) });

        let cx = a.call(()).unwrap();
        assert!(matches!(
            b.resume(&cx, ()),
            Err(HookError::ContextOwnershipMismatch)
        ));
        // A clone of the same wrapped function shares identity.
        assert!(a.clone().resume(&cx, ()).is_ok());
    }

    #[test]
    fn test_resume_while_pending_fails() {
        let f = wrap(|(): ()| -> Result<(), HookError> {
            use_effect(|| ())?;
            Ok(())
        });
        let cx = f.call(()).unwrap();
        assert!(matches!(
            f.resume(&cx, ()),
            Err(HookError::ContextHasPendingEffects)
        ));
        cx.effects().unwrap();
        assert!(f.resume(&cx, ()).is_ok());
    }

    #[test]
    fn test_reentering_active_context_fails() {
        type Recur = Rc<RefCell<Option<(Wrapped<(), ()>, Context)>>>;
        let recur: Recur = Rc::new(RefCell::new(None));

        let f = {
            let recur = recur.clone();
            wrap(move |(): ()| -> Result<(), HookError> {
                if let Some((f, cx)) = &*recur.borrow() {
                    assert!(matches!(f.resume(cx, ()), Err(HookError::ContextBusy)));
                }
                Ok(())
            })
        };

        let cx = f.call(()).unwrap();
        *recur.borrow_mut() = Some((f.clone(), cx));
        let stored = recur.borrow();
        let (f, cx) = stored.as_ref().unwrap();
        assert!(f.resume(cx, ()).is_ok());
    }

    #[test]
    fn test_shape_change_is_rejected() {
        let f = wrap(|extra: bool| -> Result<(), HookError> {
            let _ = use_state(|| 0)?;
            if extra {
                let _ = use_state(|| 1)?;
            }
            Ok(())
        });

        let cx = f.call(false).unwrap();
        assert!(matches!(
            f.resume(&cx, true),
            Err(HookError::ImmutableContextShape)
        ));
    }

    #[test]
    fn test_memo_returns_cached_without_recompute() {
        let computes = Rc::new(RefCell::new(0));
        let f = {
            let computes = computes.clone();
            wrap(move |g: i32| -> Result<i32, HookError> {
                let computes = computes.clone();
                let v = use_memo_with(guards![g], move || {
                    *computes.borrow_mut() += 1;
                    g * 10
                })?;
                Ok(*v)
            })
        };

        let cx = f.call(1).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 10);
        assert_eq!(*computes.borrow(), 1);

        // Same guard: the cached value comes back, the closure never runs.
        let cx = f.resume(&cx, 1).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 10);
        assert_eq!(*computes.borrow(), 1);

        let cx = f.resume(&cx, 2).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 20);
        assert_eq!(*computes.borrow(), 2);
    }

    #[test]
    fn test_bare_memo_keys_on_callable_identity() {
        let f = wrap(|x: i32| -> Result<i32, HookError> {
            let v = use_memo(move || x * 2)?;
            Ok(*v)
        });

        let cx = f.call(3).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 6);
        // Same call site, same callable identity: still the cached value.
        let cx = f.resume(&cx, 4).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 6);
    }

    #[test]
    fn test_callback_identity_is_stable() {
        let f = wrap(|(): ()| -> Result<usize, HookError> {
            let cb = use_callback(|| 42)?;
            Ok(Rc::as_ptr(&cb) as usize)
        });

        let cx = f.call(()).unwrap();
        let first = *cx.return_value::<usize>().unwrap();
        let cx = f.resume(&cx, ()).unwrap();
        let second = *cx.return_value::<usize>().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ref_cell_is_stable_and_mutable() {
        let f = wrap(|(): ()| -> Result<i32, HookError> {
            let r = use_ref(|| 0)?;
            *r.borrow_mut() += 1;
            let n = *r.borrow();
            Ok(n)
        });

        let cx = f.call(()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 1);
        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 2);
    }

    #[test]
    fn test_reducer_with_initial_action() {
        let f = wrap(|(): ()| -> Result<i32, HookError> {
            let (n, _) = use_reducer_with_action(|n: &i32, a: i32| n + a, || 10, 5)?;
            Ok(n)
        });

        let cx = f.call(()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 15);
        // The initial action fires only at allocation.
        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 15);
    }

    #[test]
    fn test_throttle_gates_on_clock() {
        let clock = TestClock::new();
        set_clock(Rc::new(clock.clone()));

        let hits = Rc::new(RefCell::new(0));
        let f = {
            let hits = hits.clone();
            wrap(move |(): ()| -> Result<(), HookError> {
                let hits = hits.clone();
                let throttled = use_throttle(
                    move |(): ()| *hits.borrow_mut() += 1,
                    Duration::from_millis(100),
                )?;
                throttled.call(());
                Ok(())
            })
        };

        let cx = f.call(()).unwrap();
        assert_eq!(*hits.borrow(), 1);

        // Within the interval: suppressed.
        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*hits.borrow(), 1);

        clock.advance(Duration::from_millis(150));
        let _ = f.resume(&cx, ()).unwrap();
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_state_notifications_carry_slot_and_values() {
        let seen = Rc::new(RefCell::new(Vec::<(usize, i32, i32)>::new()));
        let f = wrap(|(): ()| -> Result<(), HookError> {
            let (x, set) = use_state(|| -2)?;
            set.set(x + 3);
            Ok(())
        });
        let sub = f.subscribe(Listeners::new().on_state({
            let seen = seen.clone();
            move |event| {
                let prev = *event.prev.downcast_ref::<i32>().unwrap();
                let next = *event.next.downcast_ref::<i32>().unwrap();
                seen.borrow_mut().push((event.slot, prev, next));
            }
        }));

        let cx = f.call(()).unwrap();
        assert_eq!(*seen.borrow(), vec![(0, -2, 1)]);
        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*seen.borrow(), vec![(0, -2, 1), (0, 1, 4)]);

        f.unsubscribe(&sub);
        let _ = f.resume(&cx, ()).unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    /// Two no-guard effect applications produce two `effect` notifications,
    /// each delivered after `effects()`.
    #[test]
    fn test_effect_notifications_follow_application() {
        let seen = Rc::new(RefCell::new(0));
        let f = wrap(|(): ()| -> Result<(), HookError> {
            use_effect(|| ())?;
            Ok(())
        });
        let _sub = f.subscribe(Listeners::new().on_effect({
            let seen = seen.clone();
            move |_| *seen.borrow_mut() += 1
        }));

        let cx = f.call(()).unwrap();
        assert_eq!(*seen.borrow(), 0);
        cx.effects().unwrap();
        assert_eq!(*seen.borrow(), 1);

        let cx = f.resume(&cx, ()).unwrap();
        cx.effects().unwrap();
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn test_cleanup_notifications_on_reset() {
        let seen = Rc::new(RefCell::new(Vec::<usize>::new()));
        let f = wrap(|(): ()| -> Result<(), HookError> {
            use_effect_with(guards![], || on_cleanup(|| ()))?;
            Ok(())
        });
        let _sub = f.subscribe(Listeners::new().on_cleanup({
            let seen = seen.clone();
            move |event| seen.borrow_mut().push(event.slot)
        }));

        let cx = f.call(()).unwrap();
        cx.effects().unwrap();
        assert!(seen.borrow().is_empty());

        cx.reset().unwrap();
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_listener_panic_does_not_stop_delivery() {
        let seen = Rc::new(RefCell::new(0));
        let f = wrap(|(): ()| -> Result<(), HookError> {
            let (x, set) = use_state(|| 0)?;
            set.set(x + 1);
            Ok(())
        });
        let _bad = f.subscribe(
            Listeners::new().on_state(|_| panic!("listener failure")),
        );
        let _good = f.subscribe(Listeners::new().on_state({
            let seen = seen.clone();
            move |_| *seen.borrow_mut() += 1
        }));

        let _ = f.call(()).unwrap();
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn test_defer_hook_postpones_delivery() {
        let ticks = Rc::new(RefCell::new(Vec::<Tick>::new()));
        set_defer({
            let ticks = ticks.clone();
            move |tick| ticks.borrow_mut().push(tick)
        });

        let seen = Rc::new(RefCell::new(0));
        let f = wrap(|(): ()| -> Result<(), HookError> {
            let (x, set) = use_state(|| 0)?;
            set.set(x + 1);
            Ok(())
        });
        let _sub = f.subscribe(Listeners::new().on_state({
            let seen = seen.clone();
            move |_| *seen.borrow_mut() += 1
        }));

        let _ = f.call(()).unwrap();
        assert_eq!(*seen.borrow(), 0);
        assert_eq!(ticks.borrow().len(), 1);

        let tick = ticks.borrow_mut().pop().unwrap();
        tick.run();
        assert_eq!(*seen.borrow(), 1);

        clear_defer();
    }

    #[test]
    fn test_auto_threads_context_and_applies_effects() {
        let runs = Rc::new(RefCell::new(0));
        let counter = {
            let runs = runs.clone();
            auto_wrap(move |(): ()| -> Result<i32, HookError> {
                let (x, set) = use_state(|| -2)?;
                let x = x + 3;
                set.set(x);
                let runs = runs.clone();
                use_effect(move || {
                    *runs.borrow_mut() += 1;
                })?;
                Ok(x)
            })
        };

        assert_eq!(*counter.call(()).unwrap(), 1);
        assert_eq!(*counter.call(()).unwrap(), 4);
        assert_eq!(*counter.call(()).unwrap(), 7);
        // Effects were applied by each call, no manual effects().
        assert_eq!(*runs.borrow(), 3);

        counter.reset().unwrap();
        assert_eq!(*counter.call(()).unwrap(), 1);
    }

    #[test]
    fn test_auto_clone_forks_lineage() {
        let counter = auto_wrap(|(): ()| -> Result<i32, HookError> {
            let (x, set) = use_state(|| 0)?;
            let x = x + 1;
            set.set(x);
            Ok(x)
        });

        assert_eq!(*counter.call(()).unwrap(), 1);
        assert_eq!(*counter.call(()).unwrap(), 2);

        let fork = counter.clone().unwrap();
        assert_eq!(*counter.call(()).unwrap(), 3);
        assert_eq!(*fork.call(()).unwrap(), 3);
        assert_eq!(*counter.call(()).unwrap(), 4);
        assert_eq!(*fork.call(()).unwrap(), 4);
    }

    #[test]
    fn test_stale_setter_is_dropped_after_reset() {
        let escaped = Rc::new(RefCell::new(None::<Setter<i32>>));
        let f = {
            let escaped = escaped.clone();
            wrap(move |(): ()| -> Result<i32, HookError> {
                let (x, set) = use_state(|| 0)?;
                *escaped.borrow_mut() = Some(set.clone());
                set.set(x + 1);
                Ok(x)
            })
        };

        let cx = f.call(()).unwrap();
        cx.reset().unwrap();

        // The slot is gone; the write must vanish without panicking.
        escaped.borrow().as_ref().unwrap().set(99);

        let cx = f.resume(&cx, ()).unwrap();
        assert_eq!(*cx.return_value::<i32>().unwrap(), 0);
    }

    #[test]
    fn test_effects_outside_pending_fail() {
        let f = wrap(|(): ()| -> Result<(), HookError> { Ok(()) });
        let cx = f.call(()).unwrap();
        assert_eq!(cx.state(), Lifecycle::Ready);
        assert!(matches!(cx.effects(), Err(HookError::NoPendingEffects)));
    }
}
