use rust_decimal::Decimal;

/// Base used when the order does not reference a product.
pub const FALLBACK_BASE_PRICE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

const DESCRIPTION_DIVISOR: i64 = 500;

/// `base * (1 + complexity + image_factor)`, rounded to cents.
///
/// `complexity` grows with the description length (in characters) and caps
/// at 2.0; every reference image adds 0.15, capped at 0.6.
pub fn estimate_budget(base_price: Option<Decimal>, description: &str, image_count: usize) -> Decimal {
    let base = base_price.unwrap_or(FALLBACK_BASE_PRICE);

    let length = Decimal::from(description.chars().count() as u64);
    let complexity = (length / Decimal::from(DESCRIPTION_DIVISOR)).min(Decimal::TWO);

    let per_image = Decimal::new(15, 2);
    let image_factor = (Decimal::from(image_count as u64) * per_image).min(Decimal::new(6, 1));

    (base * (Decimal::ONE + complexity + image_factor)).round_dp(2)
}
