//! Fixture site shared by the unit tests.

use metatitle_shared::{Post, PostStatus, Term, TitleOptions};

use crate::store::{MemoryStore, RequestState, TitleEnv};

pub(crate) struct Fixture {
    pub options: TitleOptions,
    pub store: MemoryStore,
    pub request: RequestState,
}

impl Fixture {
    pub fn new(options: TitleOptions, store: MemoryStore, request: RequestState) -> Self {
        Self {
            options,
            store,
            request,
        }
    }

    /// "Acme", tagline "Widgets Inc", with a handful of posts, terms and labels.
    pub fn acme() -> Self {
        let store = MemoryStore::new("Acme", "Widgets Inc")
            .with_post(Post {
                id: 42,
                title: "Launch Plan".into(),
                password: "hunter2".into(),
                post_type: "post".into(),
                ..Post::default()
            })
            .with_post(Post {
                id: 43,
                title: "Board Minutes".into(),
                status: PostStatus::Private,
                post_type: "post".into(),
                ..Post::default()
            })
            .with_post(Post {
                id: 44,
                title: "Hello World".into(),
                post_type: "post".into(),
                custom_title: "Hello, Custom".into(),
                og_title: "Hello, Graph".into(),
                ..Post::default()
            })
            .with_post(Post {
                id: 45,
                title: "Plain Post".into(),
                post_type: "post".into(),
                ..Post::default()
            })
            .with_term(term(7, "category", "News", ""))
            .with_term(term(8, "tag", "Rust", ""))
            .with_term(term(9, "genre", "Jazz", ""))
            .with_term(term(10, "mood", "Calm", ""))
            .with_term(term(11, "category", "Breaking", "Breaking Coverage"))
            .with_taxonomy("genre", "Genre", "Genres")
            .with_taxonomy("mood", "", "Moods")
            .with_post_type("product", "Products")
            .with_author(1, "Ada Lovelace");

        Self::new(TitleOptions::default(), store, RequestState::default())
    }

    pub fn env(&self) -> TitleEnv<'_> {
        TitleEnv::new(&self.options, &self.store, &self.request)
    }
}

fn term(id: u64, taxonomy: &str, name: &str, doc_title: &str) -> Term {
    Term {
        id,
        taxonomy: taxonomy.into(),
        name: name.into(),
        doc_title: doc_title.into(),
    }
}
