/*! Spelling correction with symmetric delete dictionaries.

Implements single-word correction and whole-phrase compound correction over a
weighted vocabulary, using the symmetric delete algorithm: every dictionary
word is expanded once into all of its deletions up to a maximum edit
distance, and lookups only ever delete characters from the query. This
library is originally based on the [`SymSpell`] algorithm.

[`SymSpell`]: https://github.com/wolfgarbe/SymSpell

# Usage examples

```
use symdel::speller::{Speller, SymSpellBuilder, Verbosity};

let speller = SymSpellBuilder::new()
    .max_dictionary_edit_distance(2)
    .unigram_lexicon(vec![("summarized", 1000u64), ("summarize", 500)])
    .build()
    .unwrap();

let suggestions = speller.lookup("sumarized", Verbosity::Closest, false).unwrap();
assert_eq!(suggestions[0].value(), "summarized");
```

Lexicons can be read from word list files with the [`lexicon`] module, and
the `symdel` binary in the same repository wraps the library for use on the
command line.
*/

#![warn(missing_docs)]
pub mod distance;
pub mod lexicon;
pub mod speller;

pub(crate) mod constants;
