use crate::foundation::math::mul_div255;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255u16 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                let dc = mul_div255(u16::from(dst[i]), inv);
                out[i] = (u16::from(src[i]) + dc).min(255) as u8;
            }
            out
        }
    }
}

/// Source-over for two equally sized rows of premultiplied RGBA8 bytes.
pub(crate) fn over_row(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len(), "row length mismatch");
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
}

/// Undo premultiplication, e.g. before writing PNG files.
pub fn unpremultiply(px: PremulRgba8) -> PremulRgba8 {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let a16 = u32::from(a);
    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = ((u32::from(px[i]) * 255 + a16 / 2) / a16).min(255) as u8;
    }
    out[3] = a;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
