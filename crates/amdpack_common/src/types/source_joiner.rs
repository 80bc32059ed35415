use super::source::Source;

/// Collects pieces of output and joins them with a separator in one allocation.
pub struct SourceJoiner<'source> {
  inner: Vec<Box<dyn Source + 'source>>,
  separator: &'static str,
}

impl<'source> SourceJoiner<'source> {
  pub fn with_separator(separator: &'static str) -> Self {
    Self { inner: vec![], separator }
  }

  pub fn append_source<T: Source + 'source>(&mut self, source: T) {
    self.inner.push(Box::new(source));
  }

  pub fn join(&self) -> String {
    if self.inner.is_empty() {
      return String::new();
    }

    let size_hint = self.inner.iter().map(|source| source.content().len()).sum::<usize>()
      + self.separator.len() * (self.inner.len() - 1);
    let mut ret_source = String::with_capacity(size_hint);

    for (index, source) in self.inner.iter().enumerate() {
      if index > 0 {
        ret_source.push_str(self.separator);
      }
      ret_source.push_str(source.content());
    }

    ret_source
  }
}

#[test]
fn join_with_separator() {
  let mut joiner = SourceJoiner::with_separator("\n\n");
  assert_eq!(joiner.join(), "");

  joiner.append_source("a");
  joiner.append_source(String::from("b"));
  assert_eq!(joiner.join(), "a\n\nb");
}
