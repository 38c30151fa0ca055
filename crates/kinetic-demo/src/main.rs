#![forbid(unsafe_code)]

//! Kinetic demo: a scripted dinner-reservation session.
//!
//! Drives two time pickers ("arrive" and "leave") that share one column
//! lock through keyboard, notched-wheel and trackpad input on a simulated
//! 60 Hz clock, logging every committed change.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -p kinetic-demo
//! ```

use std::error::Error;
use std::time::Duration;

use kinetic::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);
const ROW_HEIGHT_PX: f64 = 40.0;

/// Booked slots: 5:00, 5:15, 6:45, all of 7 and 8:15 onwards.
fn booked(value: &TimeValue) -> bool {
    match value.hour {
        5 => matches!(value.minute, 0 | 15),
        6 => value.minute == 45,
        7 => true,
        8 => value.minute != 0,
        _ => false,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Simulated frame clock.
struct Clock {
    now: Instant,
}

impl Clock {
    fn advance(&mut self, by: Duration) -> Instant {
        self.now += by;
        self.now
    }
}

fn run_frames(picker: &mut TimePicker, clock: &mut Clock, frames: u32) {
    for _ in 0..frames {
        let now = clock.advance(FRAME);
        picker.tick(now);
    }
}

fn picker(
    label: &'static str,
    config: &TimePickerConfig,
    lock: &ColumnLock,
) -> Result<TimePicker> {
    let picker = TimePicker::with_lock(
        config.clone(),
        &FixedRowHeight(ROW_HEIGHT_PX),
        booked,
        lock.clone(),
    )?
    .on_change(move |value| info!(picker = label, value = %value, "time changed"))
    .on_start(move |value| info!(picker = label, value = %value, "use as start"))
    .on_end(move |value| info!(picker = label, value = %value, "use as end"));
    Ok(picker)
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    init_tracing();

    let config = TimePickerConfig::default()
        .hours([5, 6, 7, 8])
        .minute_step(15)
        .meridiem(MeridiemMode::Fixed(Meridiem::Pm))
        .initial(TimeValue::twelve(7, 0, Meridiem::Pm));
    info!(config = %serde_json::to_string(&config)?, "dinner picker config");

    let lock = ColumnLock::default();
    let mut arrive = picker("arrive", &config, &lock)?;
    let mut leave = picker("leave", &config, &lock)?;
    let mut clock = Clock {
        now: Instant::now(),
    };
    info!(arrive = %arrive.value(), leave = %leave.value(), "initial values");

    // Trackpad: drag the arrival hour up three rows, passing the closed 7.
    for _ in 0..12 {
        let now = clock.advance(FRAME);
        arrive.handle_scroll(Column::Hour, &ScrollEvent::pixels(-10.0), now);
        arrive.tick(now);
    }
    // The leave picker cannot steal the gesture while the lock is held.
    let now = clock.now;
    leave.handle_scroll(Column::Hour, &ScrollEvent::pixels(-10.0), now);
    run_frames(&mut arrive, &mut clock, 30);

    // Keyboard: step the arrival minute forward through open slots.
    let now = clock.advance(Duration::from_millis(300));
    arrive.handle_key(Column::Minute, &KeyEvent::new(KeyCode::Down), now);
    run_frames(&mut arrive, &mut clock, 20);

    // Notched wheel on the leave picker once the lock has been released.
    let now = clock.advance(Duration::from_millis(300));
    leave.handle_scroll(Column::Minute, &ScrollEvent::lines(1.0), now);
    run_frames(&mut leave, &mut clock, 30);

    // Programmatic jump into a booked slot resolves to an open one.
    let now = clock.advance(FRAME);
    leave.set_value(TimeValue::twelve(6, 45, Meridiem::Pm), now);

    // Reduced motion: steps apply synchronously.
    leave.set_reduced_motion(true);
    let now = clock.advance(FRAME);
    leave.handle_key(Column::Minute, &KeyEvent::new(KeyCode::Down), now);

    arrive.press_start();
    leave.press_end();
    info!(
        arrive = %serde_json::to_string(&arrive.value())?,
        leave = %serde_json::to_string(&leave.value())?,
        "reservation"
    );

    arrive.dispose();
    leave.dispose();
    Ok(())
}
