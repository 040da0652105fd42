use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use segview_imgproc::color::hsv_to_rgb;

/// Seed used for the color shuffle unless told otherwise.
pub const DEFAULT_SEED: u64 = 42;

/// Color used for class ids outside of the color table.
pub const FALLBACK_COLOR: [u8; 3] = [128, 128, 128];

/// Upper bound of every color channel, kept below 255 so blended colors do not clip to white.
pub const MAX_CHANNEL: f32 = 250.0;

/// Ordered class name table of the segmentation model.
///
/// The position of a name is its class id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassNames {
    names: Vec<String>,
}

impl ClassNames {
    /// Create the table from the names ordered by class id.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Parse one class name per line, ignoring blank lines and surrounding spaces.
    ///
    /// # Example
    ///
    /// ```
    /// use segview_annotate::ClassNames;
    ///
    /// let names = ClassNames::from_lines("Tooth_11\n Tooth_12 \n\nTooth_13\n");
    /// assert_eq!(names.len(), 3);
    /// assert_eq!(names.label(1), "Tooth_12");
    /// ```
    pub fn from_lines(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { names }
    }

    /// Get the name of a class, if the id is part of the table.
    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    /// Get the display label of a class, `class_{id}` when the id is unknown.
    pub fn label(&self, class_id: usize) -> String {
        match self.get(class_id) {
            Some(name) => name.to_string(),
            None => format!("class_{class_id}"),
        }
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table holds no class.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over the names in class id order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for ClassNames {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

/// Read only mapping from class id to an RGB display color.
///
/// Class `i` out of `N` starts from the fully saturated hue `i / N`; the list is
/// then shuffled with a generator seeded locally, so the same class count and
/// seed always give the same table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<[u8; 3]>,
}

impl ColorTable {
    /// Build the color table for `num_classes` classes.
    ///
    /// # Arguments
    ///
    /// * `num_classes` - The number of classes of the model.
    /// * `seed` - The seed of the shuffle.
    ///
    /// # Example
    ///
    /// ```
    /// use segview_annotate::ColorTable;
    ///
    /// let table = ColorTable::new(1, 42);
    /// assert_eq!(table.get(0), Some([250, 0, 0]));
    /// assert_eq!(table.get(1), None);
    /// ```
    pub fn new(num_classes: usize, seed: u64) -> Self {
        let mut colors = (0..num_classes)
            .map(|i| hsv_to_rgb(i as f32 / num_classes as f32, 1.0, 1.0))
            .collect::<Vec<_>>();

        let mut rng = StdRng::seed_from_u64(seed);
        colors.shuffle(&mut rng);

        let colors = colors
            .into_iter()
            .map(|[r, g, b]| {
                [
                    (r * MAX_CHANNEL) as u8,
                    (g * MAX_CHANNEL) as u8,
                    (b * MAX_CHANNEL) as u8,
                ]
            })
            .collect();

        Self { colors }
    }

    /// Build the color table for all the classes of a name table.
    pub fn from_class_names(names: &ClassNames, seed: u64) -> Self {
        Self::new(names.len(), seed)
    }

    /// Get the color of a class, if the id is part of the table.
    pub fn get(&self, class_id: usize) -> Option<[u8; 3]> {
        self.colors.get(class_id).copied()
    }

    /// Get the color of a class, [`FALLBACK_COLOR`] when the id is unknown.
    pub fn color_for(&self, class_id: usize) -> [u8; 3] {
        self.get(class_id).unwrap_or(FALLBACK_COLOR)
    }

    /// Number of colors, one per class.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colors in class id order.
    pub fn as_slice(&self) -> &[[u8; 3]] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_table() {
        let a = ColorTable::new(32, DEFAULT_SEED);
        let b = ColorTable::new(32, DEFAULT_SEED);
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn seed_changes_the_order_only() {
        let a = ColorTable::new(32, 42);
        let b = ColorTable::new(32, 7);
        assert_ne!(a, b);

        let mut sorted_a = a.as_slice().to_vec();
        let mut sorted_b = b.as_slice().to_vec();
        sorted_a.sort();
        sorted_b.sort();
        assert_eq!(sorted_a, sorted_b);
    }

    #[test]
    fn channels_in_range_and_distinct() {
        for n in [1, 2, 3, 7, 16, 52] {
            let table = ColorTable::new(n, DEFAULT_SEED);
            assert!(table
                .as_slice()
                .iter()
                .flatten()
                .all(|&c| c as f32 <= MAX_CHANNEL));

            let unique = table.as_slice().iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), n);
        }
    }

    #[test]
    fn empty_table() {
        let table = ColorTable::new(0, DEFAULT_SEED);
        assert!(table.is_empty());
        assert_eq!(table.color_for(0), FALLBACK_COLOR);
    }

    #[test]
    fn hue_partition_before_shuffle() {
        // with three classes the hues are red, green and blue in some order
        let table = ColorTable::new(3, DEFAULT_SEED);
        let mut colors = table.as_slice().to_vec();
        colors.sort();
        assert_eq!(colors, vec![[0, 0, 250], [0, 250, 0], [250, 0, 0]]);
    }

    #[test]
    fn class_names_fallback_label() {
        let names = ClassNames::new(vec!["Tooth_11".to_string()]);
        assert_eq!(names.label(0), "Tooth_11");
        assert_eq!(names.label(4), "class_4");
        assert_eq!(ColorTable::from_class_names(&names, 1).len(), 1);
    }
}
