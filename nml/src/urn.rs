//! URN minting.
//!
//! Every identifier the builder creates has the shape
//!
//! ```text
//! urn:ogf:network:<basename>:<year>[:<extra>]*:<name>[:<extra>]*[:<token>]
//! ```
//!
//! where each segment is percent-encoded on its own before the segments are
//! joined with `:`. The year comes from a [`Clock`], the optional trailing
//! token from a [`TokenSource`]; both are pluggable so that documents can be
//! produced deterministically.

use std::borrow::Cow;

use chrono::{Local, NaiveDate};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

use crate::error::{NmlError, Result};
use crate::model::{iris, require_raw, Identifier, Iri};
use crate::vocab::Direction;

/// Segment delimiter inside a URN.
pub const DELIMITER: char = ':';

/// Length of the random uniqueness token.
pub const TOKEN_LEN: usize = 6;

/// Extra segments accepted by [`UrnAuthority::mint`] (exclusive bound).
pub const MAX_EXTRAS: usize = 5;

/// Bytes escaped inside a segment: everything except ASCII alphanumerics
/// and `_ . - /`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'/');

/// Percent-encodes one URN segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Source of calendar dates.
pub trait Clock: Send {
    /// The current local date.
    fn today(&self) -> NaiveDate;
}

/// [`Clock`] backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// [`Clock`] that always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Source of uniqueness tokens appended to randomized URNs.
pub trait TokenSource: Send {
    /// Returns a fresh [`TOKEN_LEN`]-character alphanumeric token.
    fn token(&mut self) -> String;
}

/// [`TokenSource`] drawing from the thread-local RNG. Not cryptographically
/// meaningful; the token only lowers the odds of collisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn token(&mut self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect()
    }
}

/// [`TokenSource`] yielding `T00000`, `T00001`, ... for reproducible output.
///
/// Tokens widen past `T99999` (`T100000`, ...) instead of wrapping, so a
/// sequence never repeats a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialTokens {
    next: u64,
}

impl TokenSource for SequentialTokens {
    fn token(&mut self) -> String {
        let token = format!("T{:05}", self.next);
        self.next += 1;
        token
    }
}

/// Mints URNs below one base name.
pub struct UrnAuthority {
    basename: String,
    extras: Vec<String>,
    base: String,
    clock: Box<dyn Clock>,
    tokens: Box<dyn TokenSource>,
}

impl std::fmt::Debug for UrnAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrnAuthority")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl UrnAuthority {
    /// Creates an authority using the system clock and random tokens.
    #[must_use]
    pub fn new(basename: &str, extras: &[&str]) -> Self {
        Self::with_sources(basename, extras, Box::new(SystemClock), Box::new(RandomTokens))
    }

    /// Creates an authority with explicit date and token sources.
    #[must_use]
    pub fn with_sources(
        basename: &str,
        extras: &[&str],
        clock: Box<dyn Clock>,
        tokens: Box<dyn TokenSource>,
    ) -> Self {
        let mut authority = UrnAuthority {
            basename: basename.to_owned(),
            extras: extras.iter().map(|e| (*e).to_owned()).collect(),
            base: String::new(),
            clock,
            tokens,
        };
        authority.rebuild_base();
        authority
    }

    /// Replaces the base name. URNs minted earlier are unaffected.
    pub fn set_base_name(&mut self, basename: &str, extras: &[&str]) {
        self.basename = basename.to_owned();
        self.extras = extras.iter().map(|e| (*e).to_owned()).collect();
        self.rebuild_base();
    }

    /// Swaps the date source and recomputes the base name's year.
    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
        self.rebuild_base();
    }

    /// Swaps the token source.
    pub fn set_tokens(&mut self, tokens: Box<dyn TokenSource>) {
        self.tokens = tokens;
    }

    fn rebuild_base(&mut self) {
        let year = self.clock.today().format("%Y").to_string();
        let mut segments = vec![
            iris::URN_ROOT.to_owned(),
            encode_segment(&self.basename),
            year,
        ];
        segments.extend(self.extras.iter().map(|e| encode_segment(e)));
        self.base = segments.join(":");
    }

    /// The bare base name as an identifier.
    #[must_use]
    pub fn base_urn(&self) -> Iri {
        Iri::from_trusted(self.base.clone())
    }

    /// Today's date according to this authority's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Mints `<base>:<name>[:<extra>]*`, appending a random token when
    /// `randomize` is set.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] if `name` is already a resolved
    /// identifier or if `extras` holds [`MAX_EXTRAS`] or more segments.
    pub fn mint(&mut self, name: &str, extras: &[&str], randomize: bool) -> Result<Iri> {
        require_raw("name", name)?;
        if extras.len() >= MAX_EXTRAS {
            return Err(NmlError::invalid("extras", extras.join(":")));
        }

        let mut urn = String::with_capacity(self.base.len() + name.len() + 16);
        urn.push_str(&self.base);
        urn.push(DELIMITER);
        urn.push_str(&encode_segment(name));
        for extra in extras {
            urn.push(DELIMITER);
            urn.push_str(&encode_segment(extra));
        }
        if randomize {
            urn.push(DELIMITER);
            urn.push_str(&encode_segment(&self.tokens.token()));
        }

        debug!(%urn, randomize, "minted urn");
        Ok(Iri::from_trusted(urn))
    }

    /// Mints the URN of a port: `<base>:<device>:<port>[:<extra>]*[:<direction>]`.
    ///
    /// When `device` is a minted identifier its final segment, still
    /// percent-encoded, is used as the device name and encoded again, so a
    /// Node URN can be passed straight through. The
    /// direction always comes last so [`crate::port::split_port`] can strip it.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] if `device` (as a name) or `port`
    /// is already a resolved identifier, or if the port, extras, and
    /// direction together exceed the segment limit of [`UrnAuthority::mint`].
    pub fn mint_port(
        &mut self,
        device: &Identifier,
        port: &str,
        direction: Option<Direction>,
        extras: &[&str],
    ) -> Result<Iri> {
        let device = device_name(device)?;
        require_raw("port", port)?;

        let mut segments: Vec<&str> = Vec::with_capacity(extras.len() + 2);
        segments.push(port);
        segments.extend_from_slice(extras);
        if let Some(direction) = direction {
            segments.push(direction.as_str());
        }
        self.mint(&device, &segments, false)
    }
}

/// Resolves a device to the raw name used as a URN segment.
pub(crate) fn device_name(device: &Identifier) -> Result<Cow<'_, str>> {
    match device {
        Identifier::Name(name) => {
            require_raw("device", name)?;
            Ok(Cow::Borrowed(name.as_str()))
        }
        Identifier::Iri(iri) => Ok(Cow::Borrowed(iri.last_segment())),
    }
}
