use crate::image_pipeline::lut::LutTable;

#[inline]
fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

impl LutTable {
    /// Looks up a colour with trilinear interpolation across the 8 corners of
    /// its enclosing lattice cell.
    ///
    /// The input is normalised through the table's domain first, so values
    /// outside the domain sample the nearest face of the cube. Lattices with
    /// fewer than two points per axis have no cell to interpolate in: a
    /// single-point lattice returns its only sample and an empty one returns
    /// the input unchanged.
    pub fn sample(&self, color: [f32; 3]) -> [f32; 3] {
        let n = self.lattice.size();
        match n {
            0 => return color,
            1 => return self.lattice.at(0, 0, 0),
            _ => {}
        }

        let t = self.domain.normalize(color);
        let scale = (n - 1) as f32;

        let mut base = [0usize; 3];
        let mut frac = [0.0f32; 3];
        for axis in 0..3 {
            let x = t[axis] * scale;
            // Keep the cell's +1 neighbour in bounds; the top edge lands at frac == 1.
            let x0 = (x.floor() as usize).min(n - 2);
            base[axis] = x0;
            frac[axis] = x - x0 as f32;
        }

        let [r0, g0, b0] = base;
        let [fr, fg, fb] = frac;
        let (r1, g1, b1) = (r0 + 1, g0 + 1, b0 + 1);

        let c000 = self.lattice.at(r0, g0, b0);
        let c100 = self.lattice.at(r1, g0, b0);
        let c010 = self.lattice.at(r0, g1, b0);
        let c110 = self.lattice.at(r1, g1, b0);
        let c001 = self.lattice.at(r0, g0, b1);
        let c101 = self.lattice.at(r1, g0, b1);
        let c011 = self.lattice.at(r0, g1, b1);
        let c111 = self.lattice.at(r1, g1, b1);

        let c00 = lerp(c000, c100, fr);
        let c10 = lerp(c010, c110, fr);
        let c01 = lerp(c001, c101, fr);
        let c11 = lerp(c011, c111, fr);

        let c0 = lerp(c00, c10, fg);
        let c1 = lerp(c01, c11, fg);

        lerp(c0, c1, fb)
    }
}
