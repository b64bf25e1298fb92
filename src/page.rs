//! Page assembly: resolution followed by sidebar grouping.
//!
//! [`PageAssembler::assemble`] is the only entry point the generator uses per
//! route. A not-found resolution returns immediately; the grouper only runs
//! for tutorials that exist.

use crate::resolve::{ContentResolver, Resolution};
use crate::routes::RouteKey;
use crate::sidebar::{GroupTutorials, SidebarGroups};
use crate::store::ContentRepository;
use crate::types::Tutorial;
use serde::Serialize;

/// Render-ready model handed to the HTML layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageModel<'a> {
    pub tutorial: &'a Tutorial,
    pub sidebar_groups: SidebarGroups,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<'a> {
    Found(PageModel<'a>),
    NotFound,
}

impl<'a> PageOutcome<'a> {
    pub fn into_model(self) -> Option<PageModel<'a>> {
        match self {
            PageOutcome::Found(model) => Some(model),
            PageOutcome::NotFound => None,
        }
    }
}

pub struct PageAssembler<'a, R, G> {
    repo: &'a R,
    resolver: ContentResolver<'a, R>,
    grouper: G,
}

impl<'a, R: ContentRepository, G: GroupTutorials> PageAssembler<'a, R, G> {
    pub fn new(repo: &'a R, match_category: bool, grouper: G) -> Self {
        Self {
            repo,
            resolver: ContentResolver::new(repo, match_category),
            grouper,
        }
    }

    pub fn assemble(&self, category: &str, slug: &str) -> PageOutcome<'a> {
        let tutorial = match self.resolver.resolve(category, slug) {
            Resolution::Found(tutorial) => tutorial,
            Resolution::NotFound => return PageOutcome::NotFound,
        };

        // Siblings come from the stored category, which is what the sidebar
        // lists even when the request path carried a different one.
        let siblings = self.repo.summaries_in(&tutorial.category);
        let sidebar_groups = self.grouper.group(siblings, Some(&tutorial.slug));

        PageOutcome::Found(PageModel {
            tutorial,
            sidebar_groups,
        })
    }

    pub fn assemble_route(&self, route: &RouteKey) -> PageOutcome<'a> {
        self.assemble(&route.category, &route.slug)
    }

    pub fn resolver(&self) -> &ContentResolver<'a, R> {
        &self.resolver
    }
}
