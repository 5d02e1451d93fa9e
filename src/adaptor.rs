use memchr::memmem;

/// Finds the first exact occurrence of an adaptor within read sequences.
///
/// The searcher is built once per run and reused for every read.
pub struct AdaptorLocator<'a> {
    finder: memmem::Finder<'a>,
}

impl<'a> AdaptorLocator<'a> {
    pub fn new(adaptor: &'a str) -> Self {
        Self {
            finder: memmem::Finder::new(adaptor.as_bytes()),
        }
    }

    /// Zero-based index of the first occurrence of the adaptor in `seq`, if any.
    #[inline]
    pub fn locate(&self, seq: &str) -> Option<usize> {
        self.finder.find(seq.as_bytes())
    }

    /// The part of `seq` before the adaptor, or `None` if the adaptor does not occur.
    pub fn prefix<'s>(&self, seq: &'s str) -> Option<&'s str> {
        self.locate(seq).map(|i| &seq[..i])
    }
}
