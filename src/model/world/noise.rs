// Classic table-based Perlin noise. Deterministic: the permutation is fixed,
// so every world generated with the same configuration is identical.

const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Permutation lookup, index wrapped mod 256.
#[inline]
fn perm(i: i32) -> i32 {
    PERMUTATION[(i & 255) as usize] as i32
}

/// Lattice cell index mod 256. The `i64` cast saturates, so huge or infinite
/// coordinates still give an index in range.
#[inline]
fn wrap_cell(floor: f32) -> i32 {
    (floor as i64 & 255) as i32
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product with one of 12 edge gradients picked by the low 4 hash bits.
#[inline]
fn grad(hash: i32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// 3D Perlin noise, roughly in [-1, 1] and exactly 0 on integer lattice points.
pub fn perlin(x: f32, y: f32, z: f32) -> f32 {
    // floor, not truncation, so negative coordinates land in the right cell
    let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
    // lattice indices wrapped to 0..256 up front; the table repeats with that period
    let (xi, yi, zi) = (wrap_cell(fx), wrap_cell(fy), wrap_cell(fz));
    let (x, y, z) = (x - fx, y - fy, z - fz);
    let (u, v, w) = (fade(x), fade(y), fade(z));

    let a = perm(xi) + yi;
    let aa = perm(a) + zi;
    let ab = perm(a + 1) + zi;
    let b = perm(xi + 1) + yi;
    let ba = perm(b) + zi;
    let bb = perm(b + 1) + zi;

    lerp(
        lerp(
            lerp(grad(perm(aa), x, y, z), grad(perm(ba), x - 1.0, y, z), u),
            lerp(grad(perm(ab), x, y - 1.0, z), grad(perm(bb), x - 1.0, y - 1.0, z), u),
            v,
        ),
        lerp(
            lerp(
                grad(perm(aa + 1), x, y, z - 1.0),
                grad(perm(ba + 1), x - 1.0, y, z - 1.0),
                u,
            ),
            lerp(
                grad(perm(ab + 1), x, y - 1.0, z - 1.0),
                grad(perm(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                u,
            ),
            v,
        ),
        w,
    )
}

/// 2D fractal sum on the y = 0 slice: each octave doubles the frequency and
/// scales the amplitude by `persistence`. Not normalised.
pub fn octave_noise(x: f32, z: f32, octaves: u32, frequency: f32, amplitude: f32, persistence: f32) -> f32 {
    let mut total = 0.0;
    let mut frequency = frequency;
    let mut amplitude = amplitude;

    for _ in 0..octaves {
        total += perlin(x * frequency, 0.0, z * frequency) * amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }
    total
}
