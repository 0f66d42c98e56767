use crate::error::{AudioError, AudioResult};

/*
MIDI 2.0 Bit Scaling
====================

MIDI 1.0 controllers are 7-bit (0-127), MIDI 2.0 controllers are 16 or 32
bits. Converting between resolutions naively (shifting left and filling with
zeros) has a subtle flaw: the maximum 7-bit value 127 would become 65024
instead of 65535, so "full volume" in the old resolution is no longer full
volume in the new one.

The MIDI 2.0 specification (M2-115-U) defines two conversions:

Min-Center-Max (section 3.3)
----------------------------

Preserves the three musically meaningful landmarks exactly:

  minimum  0        -> 0
  center   2^(s-1)  -> 2^(d-1)     (s = source bits, d = destination bits)
  maximum  2^s - 1  -> 2^d - 1

Values at or below center are plain-shifted, which keeps min and center
exact. Values above center get the "bit repeat" treatment: the low s-1 bits
of the source are replicated down into the bits vacated by the shift, so the
result approaches full scale as the input approaches its own full scale.

Worked example, 127 from 7 to 16 bits (shift = 9, center = 64):

  127 << 9                    = 1111111_000000000
  repeat pattern (low 6 bits) =         111111
  aligned and OR'd in         = 1111111_111111_111   (65535)

Zero Extension (section 4.3)
----------------------------

The simpler rule: upscaling zero-fills the new low bits, downscaling rounds
to nearest and clamps. Cheap, but max no longer maps to max. The channel
processor always uses Min-Center-Max for velocity; zero extension is public
for callers that want the non-pattern-preserving rule.

Both functions are pure and total over the valid domain: widths in 1..=32
and value < 2^src_bits. Anything else is a contract violation and comes back
as `InvalidParameter` rather than a silently truncated guess.
*/

/// Largest value representable in `bits` bits. `bits` must be in 1..=32.
#[inline]
fn full_scale(bits: u8) -> u32 {
    (((1u64) << bits) - 1) as u32
}

fn check_args(value: u32, src_bits: u8, dst_bits: u8) -> AudioResult<()> {
    if src_bits == 0 || src_bits > 32 {
        return Err(AudioError::InvalidParameter {
            reason: "source bit width must be in 1..=32",
        });
    }
    if dst_bits == 0 || dst_bits > 32 {
        return Err(AudioError::InvalidParameter {
            reason: "destination bit width must be in 1..=32",
        });
    }
    if value > full_scale(src_bits) {
        return Err(AudioError::InvalidParameter {
            reason: "value does not fit in the source bit width",
        });
    }
    Ok(())
}

/// Min-Center-Max scaling (M2-115-U section 3.3).
///
/// Maps `value` from `src_bits` resolution to `dst_bits` resolution so that
/// minimum, center, and maximum are preserved exactly. Deterministic and
/// monotone in `value` for fixed widths.
pub fn scale_mcm(value: u32, src_bits: u8, dst_bits: u8) -> AudioResult<u32> {
    check_args(value, src_bits, dst_bits)?;

    if src_bits >= dst_bits {
        // Downscaling: truncating shift, no rounding.
        return Ok(value >> (src_bits - dst_bits));
    }

    if src_bits == 1 {
        // 1-bit source is a switch: off -> 0, on -> full scale.
        return Ok(if value == 0 { 0 } else { full_scale(dst_bits) });
    }

    let shift = dst_bits - src_bits;
    let center = 1u32 << (src_bits - 1);
    let mut scaled = value << shift;

    if value <= center {
        return Ok(scaled);
    }

    // Above center: replicate the low src_bits-1 bits of the source into the
    // low bits vacated by the shift, so max maps to max.
    let repeat_bits = src_bits - 1;
    let mut repeat = value & full_scale(repeat_bits);

    // Align the first copy of the pattern directly below the shifted value.
    if shift > repeat_bits {
        repeat <<= shift - repeat_bits;
    } else {
        repeat >>= repeat_bits - shift;
    }

    // repeat_bits >= 1 here, so each shift strictly erodes the pattern and
    // the loop runs at most ceil(32 / repeat_bits) times.
    while repeat != 0 {
        scaled |= repeat;
        repeat >>= repeat_bits;
    }

    Ok(scaled)
}

/// Zero-extension scaling (M2-115-U section 4.3).
///
/// Upscaling left-shifts and zero-fills; downscaling rounds to nearest and
/// clamps to the destination full scale. Equal widths return the value
/// unchanged.
pub fn scale_zero_ext(value: u32, src_bits: u8, dst_bits: u8) -> AudioResult<u32> {
    check_args(value, src_bits, dst_bits)?;

    if src_bits == dst_bits {
        return Ok(value);
    }

    if src_bits > dst_bits {
        // Round half up, then clamp: rounding can push the result past the
        // destination range (e.g. 255 from 8 to 4 bits rounds to 16).
        let scale_bits = src_bits - dst_bits;
        let half = 1u64 << (scale_bits - 1);
        let rounded = ((value as u64 + half) >> scale_bits) as u32;
        return Ok(rounded.min(full_scale(dst_bits)));
    }

    Ok(value << (dst_bits - src_bits))
}
