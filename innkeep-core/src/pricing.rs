use serde::Serialize;

/// Tax applied when a room has no tax percent of its own.
pub const DEFAULT_TAX_PERCENT: i64 = 12;

/// Charges for a stay, all in paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAmount {
    pub room_price: i64,
    pub tax_amount: i64,
    pub total_amount: i64,
}

/// Room charge for `nights`, plus tax rounded half up to the nearest paisa.
pub fn calculate_booking_amount(price_per_night: i64, nights: i64, tax_percent: i64) -> BookingAmount {
    let room_price = price_per_night * nights;
    let tax_amount = (room_price * tax_percent + 50).div_euclid(100);

    BookingAmount {
        room_price,
        tax_amount,
        total_amount: room_price + tax_amount,
    }
}
