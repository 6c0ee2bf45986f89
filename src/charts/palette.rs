//! Qualitative and sequential color palettes.
//!
//! Hex values match the plotly palettes the dashboard was styled with, so the
//! rendered page keeps the familiar look regardless of plotly.js defaults.

pub const SET3: &[&str] = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462",
    "#b3de69", "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

pub const PASTEL: &[&str] = &[
    "#66c5cc", "#f6cf71", "#f89c74", "#dcb0f2", "#87c55f", "#9eb9f3",
    "#fe88b1", "#c9db74", "#8be0a4", "#b497e7", "#d3b484", "#b3b3b3",
];

pub const SET1: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33",
    "#a65628", "#f781bf", "#999999",
];

pub const VIVID: &[&str] = &[
    "#e58606", "#5d69b1", "#52bca3", "#99c945", "#cc61b0", "#24796c",
    "#daa51b", "#2f8ac4", "#764e9f", "#ed645a", "#cc3a8e", "#a5aa99",
];

pub const G10: &[&str] = &[
    "#3366cc", "#dc3912", "#ff9900", "#109618", "#990099", "#0099c6",
    "#dd4477", "#66aa00", "#b82e2e", "#316395",
];

/// Plasma sequential scale, 10 stops.
pub const PLASMA: &[&str] = &[
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b",
    "#ed7953", "#fb9f3a", "#fdca26", "#f0f921",
];

/// Cycle through a palette for the i-th series.
pub fn pick(palette: &[&'static str], i: usize) -> &'static str {
    palette[i % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_wraps_around() {
        assert_eq!(pick(SET1, 0), SET1[0]);
        assert_eq!(pick(SET1, SET1.len()), SET1[0]);
        assert_eq!(pick(SET1, SET1.len() + 2), SET1[2]);
    }
}
