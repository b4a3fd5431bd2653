//! A stateful counter without a struct: one auto-wrapped function keeps its
//! total, memoized label, and effects across calls.

use reweave_core::prelude::*;
use web_time::Duration;

fn main() {
    env_logger::init();

    let counter = auto_wrap(|step: i64| -> Result<i64, HookError> {
        let (total, set) = use_state(|| 0i64)?;
        set.update(move |n| n + step);

        let label = use_memo_with(guards![total % 2 == 0], move || {
            if total % 2 == 0 { "even" } else { "odd" }
        })?;

        use_effect_with(guards![total], move || {
            log::info!("total is now {total} ({label})", label = *label);
            on_cleanup(move || log::debug!("leaving {total}"))
        })?;

        let report = use_throttle(
            |total: i64| println!("(throttled) running total: {total}"),
            Duration::from_millis(250),
        )?;
        report.call(total);

        Ok(total)
    });

    let _sub = counter.subscribe(Listeners::new().on_state(|event| {
        if let (Some(prev), Some(next)) = (
            event.prev.downcast_ref::<i64>(),
            event.next.downcast_ref::<i64>(),
        ) {
            println!("state slot {}: {prev} -> {next}", event.slot);
        }
    }));

    for step in [1, 2, 3, 4] {
        let total = counter.call(step).expect("counter call");
        println!("returned {total}");
    }

    counter.reset().expect("counter reset");
    let total = counter.call(10).expect("counter call");
    println!("after reset: {total}");
}
