use segview_image::Image;

/// A contour as an ordered list of `[x, y]` pixel coordinates.
pub type Contour = Vec<[i32; 2]>;

/// Neighbor offsets ordered counterclockwise as seen on screen (y grows downwards),
/// starting from east.
const DIRECTIONS: [(i64, i64); 8] = [
    (1, 0),   // E
    (1, -1),  // NE
    (0, -1),  // N
    (-1, -1), // NW
    (-1, 0),  // W
    (-1, 1),  // SW
    (0, 1),   // S
    (1, 1),   // SE
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BorderKind {
    Outer,
    Hole,
}

#[derive(Debug, Clone, Copy)]
struct Border {
    kind: BorderKind,
    parent: usize,
}

/// Zero padded label grid used by the border following.
struct LabelGrid {
    stride: i64,
    labels: Vec<i64>,
}

impl LabelGrid {
    fn from_binary(src: &Image<u8, 1>) -> Self {
        let stride = src.width() as i64 + 2;
        let rows = src.height() + 2;
        let mut labels = vec![0i64; stride as usize * rows];
        for (y, row) in src.as_slice().chunks_exact(src.width().max(1)).enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    labels[(y + 1) * stride as usize + x + 1] = 1;
                }
            }
        }
        Self { stride, labels }
    }

    #[inline]
    fn index(&self, p: (i64, i64)) -> usize {
        (p.1 * self.stride + p.0) as usize
    }

    #[inline]
    fn get(&self, p: (i64, i64)) -> i64 {
        self.labels[self.index(p)]
    }

    #[inline]
    fn set(&mut self, p: (i64, i64), v: i64) {
        let idx = self.index(p);
        self.labels[idx] = v;
    }
}

fn step(p: (i64, i64), dir: usize) -> (i64, i64) {
    (p.0 + DIRECTIONS[dir].0, p.1 + DIRECTIONS[dir].1)
}

fn direction_between(from: (i64, i64), to: (i64, i64)) -> usize {
    let delta = (to.0 - from.0, to.1 - from.1);
    DIRECTIONS
        .iter()
        .position(|&d| d == delta)
        .unwrap_or(0)
}

/// Follow one border starting at `start`, entering from the zero pixel `from`.
///
/// Marks the visited border pixels with `nbd` (or `-nbd` when the pixel east of
/// them is background) and returns the border pixels in padded coordinates.
fn follow_border(
    grid: &mut LabelGrid,
    start: (i64, i64),
    from: (i64, i64),
    nbd: i64,
) -> Vec<(i64, i64)> {
    // look around the start pixel clockwise for the first non zero neighbor
    let d0 = direction_between(start, from);
    let first = (0..8)
        .map(|k| (d0 + 8 - k) % 8)
        .find(|&d| grid.get(step(start, d)) != 0);

    let Some(d1) = first else {
        // isolated pixel
        grid.set(start, -nbd);
        return vec![start];
    };

    let p1 = step(start, d1);
    let mut p2 = p1;
    let mut p3 = start;
    let mut points = Vec::new();

    loop {
        // examine counterclockwise, starting next to the previous pixel
        let d2 = direction_between(p3, p2);
        let mut east_is_background = false;
        let mut d4 = d2;
        for k in 1..=8 {
            let d = (d2 + k) % 8;
            if grid.get(step(p3, d)) != 0 {
                d4 = d;
                break;
            }
            if d == 0 {
                east_is_background = true;
            }
        }

        if east_is_background {
            grid.set(p3, -nbd);
        } else if grid.get(p3) == 1 {
            grid.set(p3, nbd);
        }
        points.push(p3);

        let p4 = step(p3, d4);
        if p4 == start && p3 == p1 {
            break;
        }
        p2 = p3;
        p3 = p4;
    }

    points
}

/// Finds the outer borders of the foreground regions of a binary image.
///
/// Pixels with a non zero value are foreground. The borders are traced with the
/// Suzuki and Abe border following algorithm (8-connectivity) and only the
/// outermost borders are returned, i.e. borders of regions sitting inside a hole
/// of another region are skipped, and holes themselves are never returned.
///
/// The contours are returned in the order they are discovered by a raster scan
/// (top to bottom, left to right), and each one is compressed with
/// [`chain_approx_simple`].
///
/// # Arguments
///
/// * `src` - The binary input image.
///
/// # Example
///
/// ```
/// use segview_image::Image;
/// use segview_imgproc::contours::find_external_contours;
///
/// #[rustfmt::skip]
/// let src = Image::<u8, 1>::new([4, 4].into(), vec![
///     0,   0,   0, 0,
///     0, 255, 255, 0,
///     0, 255, 255, 0,
///     0,   0,   0, 0,
/// ]).unwrap();
///
/// let contours = find_external_contours(&src);
/// assert_eq!(contours, vec![vec![[1, 1], [1, 2], [2, 2], [2, 1]]]);
/// ```
pub fn find_external_contours(src: &Image<u8, 1>) -> Vec<Contour> {
    if src.size().is_empty() {
        return Vec::new();
    }

    let mut grid = LabelGrid::from_binary(src);

    // label 1 is the image frame, treated as a hole border
    let mut borders = vec![
        Border {
            kind: BorderKind::Hole,
            parent: 0,
        };
        2
    ];
    let mut nbd: i64 = 1;
    let mut contours = Vec::new();

    for y in 1..=src.height() as i64 {
        let mut lnbd: i64 = 1;
        for x in 1..=src.width() as i64 {
            let p = (x, y);
            let value = grid.get(p);
            if value == 0 {
                continue;
            }

            let start = if value == 1 && grid.get((x - 1, y)) == 0 {
                Some((BorderKind::Outer, (x - 1, y)))
            } else if value >= 1 && grid.get((x + 1, y)) == 0 {
                if value > 1 {
                    lnbd = value;
                }
                Some((BorderKind::Hole, (x + 1, y)))
            } else {
                None
            };

            if let Some((kind, from)) = start {
                nbd += 1;
                let previous = borders[lnbd as usize];
                let parent = if kind == previous.kind {
                    previous.parent
                } else {
                    lnbd as usize
                };
                borders.push(Border { kind, parent });

                let points = follow_border(&mut grid, p, from, nbd);
                if kind == BorderKind::Outer && parent == 1 {
                    let contour = points
                        .into_iter()
                        .map(|(px, py)| [(px - 1) as i32, (py - 1) as i32])
                        .collect::<Vec<_>>();
                    contours.push(chain_approx_simple(&contour));
                }
            }

            let value = grid.get(p);
            if value != 1 {
                lnbd = value.abs();
            }
        }
    }

    contours
}

/// Finds the first outer border met by a raster scan, if any.
///
/// Convenience over [`find_external_contours`] for callers that keep a single
/// silhouette per region.
pub fn find_first_external_contour(src: &Image<u8, 1>) -> Option<Contour> {
    find_external_contours(src).into_iter().next()
}

/// Compress a closed contour keeping only the points where the direction changes.
///
/// Horizontal, vertical and diagonal runs collapse to their end points, which is
/// equivalent to the `CHAIN_APPROX_SIMPLE` strategy.
///
/// # Example
///
/// ```
/// use segview_imgproc::contours::chain_approx_simple;
///
/// let contour = vec![[0, 0], [0, 1], [0, 2], [1, 2], [1, 1], [1, 0]];
/// assert_eq!(chain_approx_simple(&contour), vec![[0, 0], [0, 2], [1, 2], [1, 0]]);
/// ```
pub fn chain_approx_simple(contour: &[[i32; 2]]) -> Contour {
    let n = contour.len();
    if n < 3 {
        return contour.to_vec();
    }

    (0..n)
        .filter(|&i| {
            let prev = contour[(i + n - 1) % n];
            let curr = contour[i];
            let next = contour[(i + 1) % n];
            let d_in = [curr[0] - prev[0], curr[1] - prev[1]];
            let d_out = [next[0] - curr[0], next[1] - curr[1]];
            d_in != d_out
        })
        .map(|i| contour[i])
        .collect()
}
