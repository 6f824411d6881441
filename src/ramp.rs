// Copyright (c) 2026 rezky_nightky

use crate::color::Hsl;

pub const BASE_HUE: f32 = 120.0;
pub const BASE_LIGHTNESS: f32 = 50.0;

const SATURATION: f32 = 100.0;
const HUE_STEP: f32 = 15.0;
const LIGHTNESS_STEP: f32 = 3.0;

/// Entry count for a (possibly fractional) trail height.
pub fn ramp_len(h: f32) -> usize {
    h.max(0.0).ceil() as usize
}

/// One color per trail cell: a constant-hue body, then a head that sheds
/// hue and gains lightness once fewer than five entries remain, so the
/// trail brightens and whitens toward its falling edge.
pub fn color_ramp(base_hue: f32, h: f32) -> Vec<Hsl> {
    let len = ramp_len(h);
    let mut out = Vec::with_capacity(len);

    let mut hue = base_hue;
    let mut lightness = BASE_LIGHTNESS;
    for i in 0..len {
        out.push(Hsl::new(hue, SATURATION, lightness));
        if (i as f32) > h - 5.0 {
            hue -= HUE_STEP;
            lightness += LIGHTNESS_STEP;
        }
    }

    out
}

/// One opacity per trail cell, rising linearly from exactly 0.0 in steps of
/// `1.5 / h`. The last entries overshoot 1.0; the render step clamps.
pub fn opacity_ramp(h: f32) -> Vec<f32> {
    let len = ramp_len(h);
    let mut out = Vec::with_capacity(len);

    let step = 1.5 / h;
    let mut opacity = 0.0f32;
    for _ in 0..len {
        out.push(opacity);
        opacity += step;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramps_have_one_entry_per_cell() {
        for h in [4.0f32, 10.0, 30.0, 50.0] {
            assert_eq!(color_ramp(BASE_HUE, h).len(), h as usize);
            assert_eq!(opacity_ramp(h).len(), h as usize);
        }
        assert_eq!(color_ramp(BASE_HUE, 4.3).len(), 5);
        assert_eq!(opacity_ramp(4.3).len(), 5);
    }

    #[test]
    fn opacity_starts_at_zero_and_never_decreases() {
        let ramp = opacity_ramp(10.0);
        assert_eq!(ramp[0], 0.0);
        for pair in ramp.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn opacity_approaches_one_and_a_half() {
        let ramp = opacity_ramp(10.0);
        let last = *ramp.last().unwrap();
        assert!(last > 1.0 && last < 1.5, "last entry was {last}");
    }

    #[test]
    fn color_body_is_uniform_green() {
        let ramp = color_ramp(BASE_HUE, 10.0);
        for entry in &ramp[..6] {
            assert_eq!(*entry, Hsl::new(120.0, 100.0, 50.0));
        }
    }

    #[test]
    fn color_head_sheds_hue_and_gains_lightness() {
        let ramp = color_ramp(BASE_HUE, 10.0);
        for pair in ramp[6..].windows(2) {
            assert!(pair[1].h < pair[0].h);
            assert!(pair[1].l > pair[0].l);
        }
        assert_eq!(ramp[7], Hsl::new(105.0, 100.0, 53.0));
        assert_eq!(ramp[9], Hsl::new(75.0, 100.0, 59.0));
    }

    #[test]
    fn short_trails_still_brighten() {
        let ramp = color_ramp(BASE_HUE, 4.0);
        assert_eq!(ramp[0], Hsl::new(120.0, 100.0, 50.0));
        for pair in ramp.windows(2) {
            assert!(pair[1].h < pair[0].h);
            assert!(pair[1].l > pair[0].l);
        }
    }

    #[test]
    fn custom_base_hue_shifts_the_whole_ramp() {
        let ramp = color_ramp(200.0, 10.0);
        assert_eq!(ramp[0], Hsl::new(200.0, 100.0, 50.0));
        assert_eq!(ramp[9], Hsl::new(155.0, 100.0, 59.0));
    }
}
