//! 외부 API의 자유 형식 주제/카테고리 문자열을 로컬 장르로 분류한다.
//!
//! 모든 함수는 실패하지 않으며 분류할 수 없는 입력은 [`FALLBACK`]으로 분류된다.

use crate::item::Genre;

/// 어떤 키워드 그룹에도 해당하지 않을 때 사용하는 장르
pub const FALLBACK: Genre = Genre::Other;

enum Keyword {
    /// 라벨에 단어가 포함 되어 있으면 해당
    Contains(&'static str),

    /// 라벨에 첫 번째 단어가 포함 되어 있고 두 번째 단어는 포함 되어 있지 않으면 해당
    ContainsWithout(&'static str, &'static str),
}

impl Keyword {
    fn matches(&self, label: &str) -> bool {
        match self {
            Keyword::Contains(word) => label.contains(word),
            Keyword::ContainsWithout(word, except) => label.contains(word) && !label.contains(except),
        }
    }
}

/// 우선 순위 순서의 키워드 그룹. 먼저 해당하는 그룹의 장르로 분류된다.
///
/// NON_FICTION은 "non-fiction"이 FICTION 그룹의 "fiction"에 먼저 걸리지 않도록 FICTION 보다 앞에 둔다.
const KEYWORD_GROUPS: [(Genre, &[Keyword]); 9] = [
    (Genre::Biography, &[
        Keyword::Contains("biography"),
        Keyword::Contains("memoir"),
        Keyword::Contains("autobiography"),
    ]),
    (Genre::Mystery, &[
        Keyword::Contains("mystery"),
        Keyword::Contains("detective"),
        Keyword::Contains("crime"),
        Keyword::Contains("thriller"),
    ]),
    (Genre::Romance, &[
        Keyword::Contains("romance"),
        Keyword::Contains("love story"),
    ]),
    (Genre::Fantasy, &[
        Keyword::Contains("fantasy"),
        Keyword::Contains("magic"),
        Keyword::Contains("wizard"),
    ]),
    (Genre::ScienceFiction, &[
        Keyword::Contains("science fiction"),
        Keyword::Contains("sci-fi"),
        Keyword::Contains("space"),
        Keyword::Contains("future"),
    ]),
    (Genre::History, &[
        Keyword::Contains("history"),
        Keyword::Contains("historical"),
    ]),
    (Genre::SelfHelp, &[
        Keyword::Contains("self-help"),
        Keyword::Contains("personal development"),
        Keyword::Contains("psychology"),
    ]),
    // "fiction"이 없는 "science" 라벨은 과학 교양서로 보고 SCIENCE_FICTION이 아닌 NON_FICTION으로 분류한다.
    (Genre::NonFiction, &[
        Keyword::Contains("non-fiction"),
        Keyword::Contains("nonfiction"),
        Keyword::ContainsWithout("science", "fiction"),
    ]),
    (Genre::Fiction, &[
        Keyword::Contains("fiction"),
        Keyword::Contains("novel"),
        Keyword::Contains("literature"),
    ]),
];

/// 라벨 하나를 분류한다.
pub fn external_label_to_local(label: &str) -> Genre {
    classify(std::iter::once(label))
}

/// 후보 도서의 라벨 목록을 분류한다.
///
/// 우선 순위가 높은 그룹부터 라벨 중 하나라도 키워드를 포함하는지 확인하기 때문에
/// 라벨의 순서는 결과에 영향을 주지 않는다.
pub fn classify_labels(labels: &[String]) -> Genre {
    classify(labels.iter().map(String::as_str))
}

fn classify<'a>(labels: impl Iterator<Item = &'a str>) -> Genre {
    let labels: Vec<String> = labels
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect();

    if labels.is_empty() {
        return FALLBACK;
    }

    KEYWORD_GROUPS.iter()
        .find(|(_, keywords)| {
            labels.iter().any(|label| keywords.iter().any(|k| k.matches(label)))
        })
        .map(|(genre, _)| *genre)
        .unwrap_or(FALLBACK)
}

/// 화면에 표시할 장르 이름
pub fn local_to_display(genre: Genre) -> &'static str {
    match genre {
        Genre::Fiction => "Fiction",
        Genre::NonFiction => "Non-Fiction",
        Genre::Mystery => "Mystery",
        Genre::Romance => "Romance",
        Genre::ScienceFiction => "Science Fiction",
        Genre::Fantasy => "Fantasy",
        Genre::Biography => "Biography",
        Genre::History => "History",
        Genre::SelfHelp => "Self-Help",
        Genre::Other => "Other",
    }
}

fn localized_display(genre: Genre) -> &'static str {
    match genre {
        Genre::Fiction => "Fikcija",
        Genre::NonFiction => "Nefikcija",
        Genre::Mystery => "Misterij",
        Genre::Romance => "Romansa",
        Genre::ScienceFiction => "Znanstvena fantastika",
        Genre::Fantasy => "Fantazija",
        Genre::Biography => "Biografija",
        Genre::History => "Povijest",
        Genre::SelfHelp => "Samopomoć",
        Genre::Other => "Ostalo",
    }
}

/// 표시 이름을 장르로 변환한다.
/// 영어 표시 이름, 현지화 된 표시 이름, 저장소에 기록되는 이름을 대소문자 구분 없이 받는다.
pub fn display_to_local(display: &str) -> Genre {
    let display = display.trim().to_lowercase();

    Genre::ALL.into_iter()
        .find(|g| {
            [local_to_display(*g), localized_display(*g), g.name()].iter()
                .any(|name| name.to_lowercase() == display)
        })
        .unwrap_or(FALLBACK)
}

pub fn all_display_names() -> Vec<&'static str> {
    Genre::ALL.into_iter().map(local_to_display).collect()
}
