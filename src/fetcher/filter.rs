use crate::item::{is_same_entry, Candidate};
use crate::resolver::BookResolver;
use tracing::{debug, warn};

pub trait Filter: Send + Sync {
    fn do_filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate>;
}

pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>
}

impl FilterChain {
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    pub fn add_filter(&mut self, filter: Box<dyn Filter>) -> &mut Self {
        self.filters.push(filter);
        self
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for FilterChain {
    fn do_filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        self.filters.iter()
            .fold(candidates, |candidates, filter| filter.do_filter(candidates))
    }
}

/// 제목이 없는 후보를 제외한다.
pub struct RequireTitleFilter;

impl Filter for RequireTitleFilter {
    fn do_filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.into_iter()
            .filter(|c| c.title().is_some())
            .collect()
    }
}

/// 저자를 알 수 없는 후보를 제외한다.
pub struct KnownAuthorFilter;

impl Filter for KnownAuthorFilter {
    fn do_filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.into_iter()
            .filter(|c| {
                let known = c.has_known_author();
                if !known {
                    debug!("저자를 알 수 없는 도서를 제외 합니다. (title: {:?})", c.title());
                }
                known
            })
            .collect()
    }
}

/// 같은 검색 결과 안에서 중복된 후보를 제외한다. 먼저 나온 후보를 남긴다.
pub struct DropDuplicateCandidateFilter;

impl Filter for DropDuplicateCandidateFilter {
    fn do_filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let mut accepted: Vec<Candidate> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let title = candidate.title().unwrap_or_default();
            let duplicated = accepted.iter().any(|a| {
                is_same_entry(a.title().unwrap_or_default(), a.primary_author(), title, candidate.primary_author())
            });
            if !duplicated {
                accepted.push(candidate);
            }
        }
        accepted
    }
}

/// 이미 서재에 있는 도서와 같은 후보를 제외한다.
///
/// 저장된 도서를 읽지 못할 경우 경고를 남기고 모든 후보를 통과 시킨다.
pub struct ExistingBookFilter {
    resolver: BookResolver,
}

impl ExistingBookFilter {
    pub fn new(resolver: BookResolver) -> Self {
        Self { resolver }
    }
}

impl Filter for ExistingBookFilter {
    fn do_filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let books = match self.resolver.fetch_books() {
            Ok(books) => books,
            Err(e) => {
                warn!("중복 확인을 위해 저장된 도서를 읽을 수 없습니다. 중복 확인을 건너 뜁니다. (error: {})", e);
                return candidates;
            }
        };

        candidates.into_iter()
            .filter(|c| {
                let title = c.title().unwrap_or_default();
                !books.iter().any(|b| b.is_duplicate_of(title, c.primary_author()))
            })
            .collect()
    }
}
