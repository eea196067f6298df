/// Display label → catalog subject slug.
pub const GENRES: &[(&str, &str)] = &[
    ("Mystery", "mystery"),
    ("Science Fiction", "science_fiction"),
    ("Fantasy", "fantasy"),
    ("Romance", "romance"),
    ("Horror", "horror"),
    ("Thriller", "thriller"),
    ("Historical Fiction", "historical_fiction"),
    ("Biography", "biography"),
    ("Memoir", "memoir"),
    ("Self-Help", "self_help"),
    ("Poetry", "poetry"),
    ("Drama", "drama"),
    ("Adventure", "adventure"),
    ("Crime Fiction", "crime_fiction"),
    ("Dystopian", "dystopian"),
    ("Paranormal", "paranormal"),
    ("Magical Realism", "magical_realism"),
    ("Classic Literature", "classic_literature"),
    ("Children's Literature", "children"),
    ("Young Adult Fiction", "young_adult"),
    ("Satire", "satire"),
    ("Philosophical Fiction", "philosophical_fiction"),
    ("Literary Fiction", "literary_fiction"),
    ("Western", "western"),
    ("Detective Fiction", "detective"),
    ("War Fiction", "war_fiction"),
    ("Gothic Fiction", "gothic"),
    ("Political Fiction", "political_fiction"),
    ("Cyberpunk", "cyberpunk"),
    ("Coming-of-Age Fiction", "coming_of_age"),
];

/// Maps a genre label to its subject slug. Unknown labels are lowercased and
/// their whitespace runs joined with `_`.
pub fn resolve_slug(genre: &str) -> String {
    GENRES
        .iter()
        .find(|(label, _)| *label == genre)
        .map(|(_, slug)| slug.to_string())
        .unwrap_or_else(|| {
            genre
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join("_")
        })
}

pub fn genre_labels() -> Vec<&'static str> {
    GENRES.iter().map(|(label, _)| *label).collect()
}
