use crate::types::ArtworkData;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

/// Background colours, indexed by label hash
pub const PALETTE: [&str; 12] = [
    "#E57373", "#F06292", "#BA68C8", "#9575CD", "#7986CB", "#64B5F6", "#4FC3F7", "#4DB6AC",
    "#81C784", "#DCE775", "#FFB74D", "#A1887F",
];

/// Edge length of the generated square, in SVG user units
const SIZE: u32 = 300;

/// Generates and caches placeholder covers
pub struct PlaceholderArt {
    cache: Arc<Mutex<LruCache<String, Arc<ArtworkData>>>>,
}

impl PlaceholderArt {
    /// Create a generator with the specified cache size
    ///
    /// # Arguments
    /// * `cache_size` - Maximum number of covers to cache (0 keeps a single entry)
    pub fn new(cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Cover for a label, served from the cache when possible
    pub fn generate(&self, label: &str) -> ArtworkData {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(label) {
            return (**cached).clone();
        }

        let artwork = render(label);
        cache.put(label.to_string(), Arc::new(artwork.clone()));
        artwork
    }

    /// Cover for a label as a `data:` URI
    pub fn cover_for(&self, label: &str) -> String {
        self.generate(label).to_data_uri()
    }
}

impl Default for PlaceholderArt {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Clone for PlaceholderArt {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

/// Render a cover without caching.
///
/// Pure: depends on nothing but `label`.
pub fn render(label: &str) -> ArtworkData {
    let color = PALETTE[(fnv1a(label) % PALETTE.len() as u32) as usize];
    let text = initials(label);

    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            r#"<rect width="{size}" height="{size}" fill="{color}"/>"#,
            r#"<text x="50%" y="50%" dy=".35em" text-anchor="middle" font-family="sans-serif" "#,
            r##"font-size="{font}" font-weight="600" fill="#FFFFFF">{text}</text>"##,
            "</svg>"
        ),
        size = SIZE,
        color = color,
        font = SIZE * 2 / 5,
        text = text,
    );

    ArtworkData::new(svg.into_bytes(), "image/svg+xml".to_string())
}

/// Up to two uppercase initials taken from the first alphanumeric character
/// of the first two words; `?` when the label has none.
pub fn initials(label: &str) -> String {
    let letters: String = label
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();

    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// 32-bit FNV-1a; stable across platforms and releases, unlike `DefaultHasher`
fn fnv1a(label: &str) -> u32 {
    const OFFSET: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    label
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u32::from(byte)).wrapping_mul(PRIME))
}
