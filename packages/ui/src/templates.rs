//! Static catalogue of page templates and art styles.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Superhero,
    Noir,
    Manga,
    Fantasy,
    Cyberpunk,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Manga,
        Category::Superhero,
        Category::Fantasy,
        Category::Noir,
        Category::Cyberpunk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Superhero => "Superhero",
            Category::Noir => "Noir",
            Category::Manga => "Manga",
            Category::Fantasy => "Fantasy",
            Category::Cyberpunk => "Cyberpunk",
        }
    }
}

/// Category tab selected above the template grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Popular,
    Only(Category),
}

impl CategoryFilter {
    fn accepts(&self, template: &Template) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Popular => template.popular,
            CategoryFilter::Only(category) => template.category == *category,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Template {
    pub id: u32,
    pub name: &'static str,
    pub category: Category,
    pub pages: u32,
    pub gradient: &'static str,
    pub popular: bool,
}

pub const TEMPLATES: [Template; 9] = [
    Template { id: 1, name: "Epic Battle", category: Category::Superhero, pages: 12, gradient: "from-red-500 to-orange-400", popular: true },
    Template { id: 2, name: "Quiet Town", category: Category::Noir, pages: 8, gradient: "from-gray-600 to-blue-900", popular: true },
    Template { id: 3, name: "School Days", category: Category::Manga, pages: 16, gradient: "from-pink-400 to-purple-500", popular: true },
    Template { id: 4, name: "Lost World", category: Category::Fantasy, pages: 20, gradient: "from-green-500 to-teal-400", popular: false },
    Template { id: 5, name: "Neon and Chrome", category: Category::Cyberpunk, pages: 10, gradient: "from-cyan-400 to-purple-500", popular: true },
    Template { id: 6, name: "Way of the Samurai", category: Category::Manga, pages: 24, gradient: "from-red-600 to-rose-400", popular: false },
    Template { id: 7, name: "City Hero", category: Category::Superhero, pages: 14, gradient: "from-blue-500 to-indigo-500", popular: true },
    Template { id: 8, name: "Forest Mystery", category: Category::Fantasy, pages: 18, gradient: "from-emerald-500 to-green-400", popular: false },
    Template { id: 9, name: "Space 2099", category: Category::Cyberpunk, pages: 30, gradient: "from-violet-500 to-fuchsia-500", popular: true },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArtStyle {
    pub name: &'static str,
    pub description: &'static str,
}

/// Styles offered by the editor; the first is the default.
pub const ART_STYLES: [ArtStyle; 10] = [
    ArtStyle { name: "Manga", description: "Japanese style with expressive eyes" },
    ArtStyle { name: "Superhero", description: "Detailed American superhero art" },
    ArtStyle { name: "European", description: "Elegant line work and narrative" },
    ArtStyle { name: "Noir", description: "Hard shadows and atmosphere" },
    ArtStyle { name: "Cyberpunk", description: "Neon, technology, futurism" },
    ArtStyle { name: "Fantasy", description: "Magic, myth and painted worlds" },
    ArtStyle { name: "Watercolor", description: "Soft gradients and texture" },
    ArtStyle { name: "Pixel art", description: "Retro 8 and 16 bit look" },
    ArtStyle { name: "Realism", description: "Photorealistic rendering" },
    ArtStyle { name: "Cartoon", description: "Bold outlines and flat color" },
];

pub fn art_style(name: &str) -> Option<&'static ArtStyle> {
    ART_STYLES.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// Templates whose name contains `search` and that pass `filter`.
pub fn filter_templates(search: &str, filter: CategoryFilter) -> Vec<&'static Template> {
    let needle = search.trim().to_lowercase();
    TEMPLATES
        .iter()
        .filter(|t| needle.is_empty() || t.name.to_lowercase().contains(&needle))
        .filter(|t| filter.accepts(t))
        .collect()
}
