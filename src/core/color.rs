use crate::core::types::PaletteColor;
use strum::IntoEnumIterator;

/// Calendar color for a customer name.
///
/// Rolling 31x string hash over UTF-16 code units, with the shift performed on
/// the 32-bit truncation of the accumulator and the subtraction on the full
/// value, then `|hash| mod palette_len`. Colors already rendered by other
/// clients depend on this exact arithmetic.
pub fn color_of(customer_name: &str) -> PaletteColor {
    let palette: Vec<PaletteColor> = PaletteColor::iter().collect();
    let hash = customer_name.encode_utf16().fold(0i64, |acc, unit| {
        let shifted = (acc as i32).wrapping_shl(5) as i64;
        unit as i64 + (shifted - acc)
    });
    let idx = (hash.unsigned_abs() % palette.len() as u64) as usize;
    palette[idx]
}
