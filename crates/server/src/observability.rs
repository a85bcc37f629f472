use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static SIGNUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "autoease_signups_total",
        "Accounts registered, by role",
        &["role"]
    )
    .expect("register signups_total")
});

pub static BOOKINGS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "autoease_bookings_created_total",
        "Booking requests created"
    )
    .expect("register bookings_created_total")
});

pub static BOOKING_DECISIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "autoease_booking_decisions_total",
        "Owner status changes, by new status",
        &["status"]
    )
    .expect("register booking_decisions_total")
});

pub static BOOKINGS_PAID_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "autoease_bookings_paid_total",
        "Booking requests marked paid"
    )
    .expect("register bookings_paid_total")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Touch every counter so they show up in `/metrics` before first use.
pub fn init_metrics() {
    Lazy::force(&SIGNUPS_TOTAL);
    Lazy::force(&BOOKINGS_CREATED_TOTAL);
    Lazy::force(&BOOKING_DECISIONS_TOTAL);
    Lazy::force(&BOOKINGS_PAID_TOTAL);
}
