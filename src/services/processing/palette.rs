use super::color::Rgb;

/// Resolve a legacy indexed-palette entry to RGB.
///
/// Covers the standard Excel indexed palette (0-63) plus a handful of custom
/// indices observed in rota spreadsheets produced by older writers. Indices
/// 64/65 are the system foreground/background pseudo-colours and have no
/// fixed RGB value, so they resolve to `None` like any unknown index.
pub fn indexed_color(index: u32) -> Option<Rgb> {
    let (r, g, b) = match index {
        0 | 8 => (0x00, 0x00, 0x00),
        1 | 9 => (0xFF, 0xFF, 0xFF),
        2 | 10 => (0xFF, 0x00, 0x00),
        3 | 11 => (0x00, 0xFF, 0x00),
        4 | 12 | 39 => (0x00, 0x00, 0xFF),
        5 | 13 | 34 => (0xFF, 0xFF, 0x00),
        6 | 14 | 33 => (0xFF, 0x00, 0xFF),
        7 | 15 | 35 => (0x00, 0xFF, 0xFF),
        16 | 37 => (0x80, 0x00, 0x00),
        17 => (0x00, 0x80, 0x00),
        18 | 32 => (0x00, 0x00, 0x80),
        19 => (0x80, 0x80, 0x00),
        20 | 36 => (0x80, 0x00, 0x80),
        21 | 38 => (0x00, 0x80, 0x80),
        22 => (0xC0, 0xC0, 0xC0),
        23 => (0x80, 0x80, 0x80),
        24 => (0x99, 0x99, 0xFF),
        25 | 61 => (0x99, 0x33, 0x66),
        26 => (0xFF, 0xFF, 0xCC),
        27 | 41 => (0xCC, 0xFF, 0xFF),
        28 => (0x66, 0x00, 0x66),
        29 => (0xFF, 0x80, 0x80),
        30 => (0x00, 0x66, 0xCC),
        31 => (0xCC, 0xCC, 0xFF),
        40 => (0x00, 0xCC, 0xFF),
        42 => (0xCC, 0xFF, 0xCC),
        43 => (0xFF, 0xFF, 0x99),
        44 => (0x99, 0xCC, 0xFF),
        45 => (0xFF, 0x99, 0xCC),
        46 => (0xCC, 0x99, 0xFF),
        47 => (0xFF, 0xCC, 0x99),
        48 => (0x33, 0x66, 0xFF),
        49 => (0x33, 0xCC, 0xCC),
        50 => (0x99, 0xCC, 0x00),
        51 => (0xFF, 0xCC, 0x00),
        52 => (0xFF, 0x99, 0x00),
        53 => (0xFF, 0x66, 0x00),
        54 => (0x66, 0x66, 0x99),
        55 => (0x96, 0x96, 0x96),
        56 => (0x00, 0x33, 0x66),
        57 => (0x33, 0x99, 0x66),
        58 => (0x00, 0x33, 0x00),
        59 => (0x33, 0x33, 0x00),
        60 => (0x99, 0x33, 0x00),
        62 => (0x33, 0x33, 0x99),
        63 => (0x33, 0x33, 0x33),
        _ => return None,
    };
    Some(Rgb { r, g, b })
}

/// Default Office theme colour scheme, in theme-index order as referenced by
/// cell styles (lt1, dk1, lt2, dk2, accent1-6, hyperlink, followed hyperlink).
/// Workbook-specific themes are not exposed by the style reader, so theme
/// slots resolve through this table.
pub fn theme_color(index: u32) -> Option<Rgb> {
    const THEME: [(u8, u8, u8); 12] = [
        (0xFF, 0xFF, 0xFF),
        (0x00, 0x00, 0x00),
        (0xE7, 0xE6, 0xE6),
        (0x44, 0x54, 0x6A),
        (0x44, 0x72, 0xC4),
        (0xED, 0x7D, 0x31),
        (0xA5, 0xA5, 0xA5),
        (0xFF, 0xC0, 0x00),
        (0x5B, 0x9B, 0xD5),
        (0x70, 0xAD, 0x47),
        (0x05, 0x63, 0xC1),
        (0x95, 0x4F, 0x72),
    ];
    THEME
        .get(index as usize)
        .map(|&(r, g, b)| Rgb { r, g, b })
}
