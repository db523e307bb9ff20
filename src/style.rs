//! Visual styling derived from a listing's colors and rarity.

use crate::models::ItemColors;

/// Opacity of the top stop of the image gradient.
pub const GRADIENT_ALPHA: f64 = 0.3;

pub const DEFAULT_BORDER: &str = "border-slate-700";

const NEUTRAL_RGB: (u8, u8, u8) = (135, 135, 135);

/// Border/glow classes per rarity, keyed by lowercase rarity name.
const RARITY_STYLES: &[(&str, &str)] = &[
    ("legendary", "shadow-[inset_0_0_150px_-50px_orange] border-orange-400"),
    ("legendario", "shadow-[inset_0_0_150px_-50px_orange] border-orange-400"),
    ("epic", "shadow-[inset_0_0_150px_-50px_purple] border-purple-500"),
    ("épico", "shadow-[inset_0_0_150px_-50px_purple] border-purple-500"),
    ("rare", "shadow-[inset_0_0_150px_-50px_blue] border-blue-400"),
    ("raro", "shadow-[inset_0_0_150px_-50px_blue] border-blue-400"),
    ("uncommon", "shadow-[inset_0_0_150px_-50px_limegreen] border-lime-400"),
    ("poco común", "shadow-[inset_0_0_150px_-50px_limegreen] border-lime-400"),
    ("common", "shadow-[inset_0_0_150px_-50px_gray] border-gray-400"),
    ("común", "shadow-[inset_0_0_150px_-50px_gray] border-gray-400"),
    ("marvel", "shadow-[inset_0_0_150px_-50px_red] border-red-500"),
    ("dc", "shadow-[inset_0_0_150px_-50px_darkblue] border-blue-600"),
    ("starwars", "shadow-[inset_0_0_150px_-50px_white] border-gray-300"),
    ("star wars", "shadow-[inset_0_0_150px_-50px_white] border-gray-300"),
    ("idol", "shadow-[inset_0_0_150px_-50px_gold] border-yellow-400"),
    ("gaminglegends", "shadow-[inset_0_0_150px_-50px_indigo] border-indigo-500"),
    ("creatorcollab", "shadow-[inset_0_0_150px_-50px_gold] border-yellow-400"),
];

/// Border classes for a rarity name; blank rarities count as common.
pub fn rarity_border(rarity: &str) -> &'static str {
    let key = rarity.trim().to_lowercase();
    let key = if key.is_empty() { "common".to_string() } else { key };
    RARITY_STYLES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_BORDER)
}

/// Background color for a card: first of background, secondary, primary,
/// tertiary, else `"transparent"`.
pub fn background_color(colors: &ItemColors) -> &str {
    [
        colors.background.as_deref(),
        colors.secondary.as_deref(),
        colors.primary.as_deref(),
        colors.tertiary.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|c| !c.is_empty())
    .unwrap_or("transparent")
}

/// CSS gradient fading from the background color at 30% into itself.
pub fn image_gradient(colors: &ItemColors) -> String {
    let bg = background_color(colors);
    format!(
        "linear-gradient(to bottom, {}, {})",
        with_alpha(bg, GRADIENT_ALPHA),
        bg
    )
}

/// Re-express a CSS color as `rgba(...)` with the given alpha.
///
/// Understands `#rrggbb`, `#rgb`, `rgb(...)` and `rgba(...)`; anything else
/// becomes a neutral gray.
pub fn with_alpha(color: &str, alpha: f64) -> String {
    let color = color.trim();
    let (r, g, b) = if let Some(hex) = color.strip_prefix('#') {
        parse_hex(hex).unwrap_or(NEUTRAL_RGB)
    } else if color.starts_with("rgb") {
        match parse_rgb_components(color) {
            Some([r, g, b]) => return format!("rgba({r}, {g}, {b}, {alpha})"),
            None => NEUTRAL_RGB,
        }
    } else {
        NEUTRAL_RGB
    };
    format!("rgba({r}, {g}, {b}, {alpha})")
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        // #rrggbbaa keeps only the color channels
        6 | 8 => Some((
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        3 => {
            let expand = |i: usize| channel(&hex.get(i..i + 1)?.repeat(2));
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

fn parse_rgb_components(color: &str) -> Option<[&str; 3]> {
    let open = color.find('(')?;
    let close = color.rfind(')')?;
    let mut parts = color.get(open + 1..close)?.split(',').map(str::trim);
    Some([parts.next()?, parts.next()?, parts.next()?])
}
