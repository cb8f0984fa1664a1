use crate::shared::Result;
use std::cmp::Ordering;
use std::fmt;

/// Comparison operator of a single version specifier (PEP 440)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    ArbitraryEqual,
    Compatible,
    Equal,
    NotEqual,
    LessThanEqual,
    GreaterThanEqual,
    LessThan,
    GreaterThan,
}

impl Operator {
    /// Longest operators first so `<=` is not read as `<`
    const ALL: [(&'static str, Operator); 8] = [
        ("===", Operator::ArbitraryEqual),
        ("~=", Operator::Compatible),
        ("==", Operator::Equal),
        ("!=", Operator::NotEqual),
        ("<=", Operator::LessThanEqual),
        (">=", Operator::GreaterThanEqual),
        ("<", Operator::LessThan),
        (">", Operator::GreaterThan),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::ArbitraryEqual => "===",
            Operator::Compatible => "~=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::LessThanEqual => "<=",
            Operator::GreaterThanEqual => ">=",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
        }
    }
}

/// A single `<operator><version>` clause, e.g. `>=0.11` or `==1.4.*`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Specifier {
    operator: Operator,
    version: String,
}

impl Specifier {
    pub fn new(operator: Operator, version: impl Into<String>) -> Self {
        Self {
            operator,
            version: version.into(),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (operator, rest) = Operator::ALL
            .iter()
            .find_map(|(symbol, op)| text.strip_prefix(symbol).map(|rest| (*op, rest)))
            .ok_or_else(|| anyhow::anyhow!("Missing comparison operator in '{}'", text))?;

        let version = rest.trim();
        if version.is_empty() {
            anyhow::bail!("Missing version after '{}' in '{}'", operator.as_str(), text);
        }
        if version.chars().any(char::is_whitespace) {
            anyhow::bail!("Unexpected whitespace in version '{}'", version);
        }

        Ok(Self::new(operator, version))
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// True for `==X.*` and `!=X.*`
    pub fn is_wildcard(&self) -> bool {
        matches!(self.operator, Operator::Equal | Operator::NotEqual) && self.version.ends_with(".*")
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.as_str(), self.version)
    }
}

/// Strategy deciding whether an installed version satisfies a specifier
///
/// The graph logic only ever asks this one question, which keeps the
/// versioning scheme swappable.
pub trait VersionScheme: fmt::Debug {
    fn satisfies(&self, version: &str, specifier: &Specifier) -> bool;
}

/// Version constraint attached to a requirement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Constraint {
    /// No specifier: any installed version is acceptable
    #[default]
    Any,
    /// Every specifier must hold
    Specifiers(Vec<Specifier>),
}

impl Constraint {
    /// Parses a comma separated specifier set such as `>=1.0,<2`
    ///
    /// An empty string yields [`Constraint::Any`].
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Constraint::Any);
        }

        let specifiers = text
            .split(',')
            .map(Specifier::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Constraint::Specifiers(specifiers))
    }

    pub fn is_any(&self) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Specifiers(specifiers) => specifiers.is_empty(),
        }
    }

    pub fn allows(&self, version: &str, scheme: &dyn VersionScheme) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Specifiers(specifiers) => {
                specifiers.iter().all(|spec| scheme.satisfies(version, spec))
            }
        }
    }
}

impl fmt::Display for Constraint {
    /// Specifiers are listed sorted, the way pip prints a specifier set
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Any => write!(f, "Any"),
            Constraint::Specifiers(specifiers) if specifiers.is_empty() => write!(f, "Any"),
            Constraint::Specifiers(specifiers) => {
                let mut rendered: Vec<String> = specifiers.iter().map(|s| s.to_string()).collect();
                rendered.sort();
                write!(f, "{}", rendered.join(","))
            }
        }
    }
}

/// Pre-release phase, ordered as PEP 440 orders them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PreRelease {
    Alpha,
    Beta,
    ReleaseCandidate,
}

/// Parsed form of a PEP 440 public version; local labels are dropped
#[derive(Debug, Clone)]
struct ParsedVersion {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreRelease, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
}

impl ParsedVersion {
    fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();
        let public = normalized.split('+').next().unwrap_or_default();
        let public = public.strip_prefix('v').unwrap_or(public);

        let (epoch, rest) = match public.split_once('!') {
            Some((epoch, rest)) => (epoch.parse().ok()?, rest),
            None => (0, public),
        };

        let mut cursor = Cursor::new(rest);
        let mut release = vec![cursor.number()?];
        while cursor.peek() == Some('.') && cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            cursor.bump();
            release.push(cursor.number()?);
        }

        let pre = cursor.pre_release();
        let post = cursor.post_release();
        let dev = cursor.dev_release();

        if !cursor.is_done() {
            return None;
        }

        Some(Self {
            epoch,
            release,
            pre,
            post,
            dev,
        })
    }

    fn is_pre_release(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    fn release_padded(&self, len: usize) -> Vec<u64> {
        let mut padded = self.release.clone();
        padded.resize(len.max(padded.len()), 0);
        padded
    }

    fn same_release(&self, other: &ParsedVersion) -> bool {
        let len = self.release.len().max(other.release.len());
        self.epoch == other.epoch && self.release_padded(len) == other.release_padded(len)
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // A dev release without pre/post sorts before every pre-release of its release
        fn pre_key(v: &ParsedVersion) -> (i8, Option<(PreRelease, u64)>) {
            match (v.pre, v.post, v.dev) {
                (None, None, Some(_)) => (-1, None),
                (Some(pre), _, _) => (0, Some(pre)),
                (None, _, _) => (1, None),
            }
        }
        fn post_key(v: &ParsedVersion) -> (i8, u64) {
            v.post.map_or((-1, 0), |n| (0, n))
        }
        fn dev_key(v: &ParsedVersion) -> (i8, u64) {
            v.dev.map_or((1, 0), |n| (0, n))
        }

        let len = self.release.len().max(other.release.len());
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.release_padded(len).cmp(&other.release_padded(len)))
            .then_with(|| pre_key(self).cmp(&pre_key(other)))
            .then_with(|| post_key(self).cmp(&post_key(other)))
            .then_with(|| dev_key(self).cmp(&dev_key(other)))
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParsedVersion {}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn is_done(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn number(&mut self) -> Option<u64> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if start == self.pos {
            return None;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .parse()
            .ok()
    }

    fn optional_number(&mut self) -> u64 {
        let checkpoint = self.pos;
        if matches!(self.peek(), Some('.' | '-' | '_'))
            && self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.bump();
        }
        match self.number() {
            Some(n) => n,
            None => {
                self.pos = checkpoint;
                0
            }
        }
    }

    /// Consumes an optional separator followed by one of `labels`
    fn label(&mut self, labels: &[&str]) -> Option<String> {
        let checkpoint = self.pos;
        if matches!(self.peek(), Some('.' | '-' | '_')) {
            self.bump();
        }
        let remaining: String = self.chars[self.pos..].iter().collect();
        // Longest label first so `preview` wins over `pre`
        let mut sorted: Vec<&&str> = labels.iter().collect();
        sorted.sort_by_key(|l| std::cmp::Reverse(l.len()));
        for label in sorted {
            if remaining.starts_with(*label) {
                self.pos += label.chars().count();
                return Some((*label).to_string());
            }
        }
        self.pos = checkpoint;
        None
    }

    fn pre_release(&mut self) -> Option<(PreRelease, u64)> {
        let label = self.label(&["a", "alpha", "b", "beta", "c", "rc", "pre", "preview"])?;
        let phase = match label.as_str() {
            "a" | "alpha" => PreRelease::Alpha,
            "b" | "beta" => PreRelease::Beta,
            _ => PreRelease::ReleaseCandidate,
        };
        Some((phase, self.optional_number()))
    }

    fn post_release(&mut self) -> Option<u64> {
        // Implicit post release: `1.0-1`
        if self.peek() == Some('-') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            return self.number();
        }
        self.label(&["post", "rev", "r"])?;
        Some(self.optional_number())
    }

    fn dev_release(&mut self) -> Option<u64> {
        self.label(&["dev"])?;
        Some(self.optional_number())
    }
}

/// Default [`VersionScheme`] following PEP 440 ordering
///
/// Versions that do not parse are compared as opaque tokens: only `==`,
/// `!=` and `===` can match them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pep440Scheme;

impl Pep440Scheme {
    pub fn new() -> Self {
        Self
    }

    /// Orders two version strings, `None` when either does not parse
    pub fn compare(&self, a: &str, b: &str) -> Option<Ordering> {
        Some(ParsedVersion::parse(a)?.cmp(&ParsedVersion::parse(b)?))
    }

    fn matches_wildcard(candidate: &ParsedVersion, prefix: &str) -> bool {
        let Some(prefix) = ParsedVersion::parse(prefix) else {
            return false;
        };
        candidate.epoch == prefix.epoch
            && candidate.release_padded(prefix.release.len())[..prefix.release.len()]
                == prefix.release[..]
    }

    fn satisfies_parsed(candidate: &ParsedVersion, specifier: &Specifier) -> Option<bool> {
        let spec_text = specifier.version();

        if specifier.is_wildcard() {
            let prefix = spec_text.trim_end_matches(".*");
            let matched = Self::matches_wildcard(candidate, prefix);
            return Some(match specifier.operator() {
                Operator::NotEqual => !matched,
                _ => matched,
            });
        }

        let target = ParsedVersion::parse(spec_text)?;
        let ordering = candidate.cmp(&target);

        let result = match specifier.operator() {
            Operator::Equal => ordering == Ordering::Equal,
            Operator::NotEqual => ordering != Ordering::Equal,
            Operator::LessThanEqual => ordering != Ordering::Greater,
            Operator::GreaterThanEqual => ordering != Ordering::Less,
            Operator::LessThan => {
                ordering == Ordering::Less
                    && !(candidate.is_pre_release()
                        && !target.is_pre_release()
                        && candidate.same_release(&target))
            }
            Operator::GreaterThan => {
                ordering == Ordering::Greater
                    && !(candidate.post.is_some()
                        && target.post.is_none()
                        && candidate.same_release(&target))
            }
            Operator::Compatible => {
                if ordering == Ordering::Less {
                    false
                } else if target.release.len() < 2 {
                    true
                } else {
                    let prefix: Vec<String> = target.release[..target.release.len() - 1]
                        .iter()
                        .map(u64::to_string)
                        .collect();
                    let prefix = if target.epoch > 0 {
                        format!("{}!{}", target.epoch, prefix.join("."))
                    } else {
                        prefix.join(".")
                    };
                    Self::matches_wildcard(candidate, &prefix)
                }
            }
            Operator::ArbitraryEqual => candidate == &target,
        };
        Some(result)
    }
}

impl VersionScheme for Pep440Scheme {
    fn satisfies(&self, version: &str, specifier: &Specifier) -> bool {
        if specifier.operator() == Operator::ArbitraryEqual {
            return version.trim().eq_ignore_ascii_case(specifier.version().trim());
        }

        match ParsedVersion::parse(version) {
            Some(candidate) => Self::satisfies_parsed(&candidate, specifier).unwrap_or(false),
            None => match specifier.operator() {
                Operator::Equal => version == specifier.version(),
                Operator::NotEqual => version != specifier.version(),
                _ => false,
            },
        }
    }
}
