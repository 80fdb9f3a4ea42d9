//! Completion tables for certificate pages
//!
//!     This crate turns the small completion-table markup into an HTML table. Rows are annotated
//!     with course progress looked up from the host: whether a course section is visible, and
//!     when (if ever) a user completed an activity.
//!
//!     This is a pure lib, that is, it powers the ctable cli but is shell agnostic. No code here
//!     should suppose a shell environment, be it std print, env vars or a database handle. All
//!     host data comes in through the traits in ./lookup.rs.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── model.rs                # Ids, timestamps, DateRange, TableConfig
//!     ├── blob.rs                 # Stored configuration (json) encode/decode
//!     ├── daterange.rs            # Date-range resolver and date formatting
//!     ├── lookup.rs               # Host lookups + in-memory store
//!     ├── markup
//!     │   ├── line.rs             # Typed line IR
//!     │   ├── parser.rs           # Escaping + line classification
//!     │   ├── resolve.rs          # Completion token substitution
//!     │   ├── serializer.rs       # IR → HTML
//!     │   └── mod.rs
//!     ├── element.rs              # Element trait and the completion table element
//!     ├── form.rs                 # Form descriptors and submitted form data
//!     ├── validation.rs           # Authoring-time validation
//!     └── strings.rs              # User facing strings
//!
//! Markup
//!
//!     Each line of the content is one of:
//!
//!     ^:30:Activity ^:30:Completed ^         header row, cells sized in percent
//!     #Week 1#                               group row, one cell spanning 3 columns
//!     | Week 1 | {completion:42} |           section row, shown according to the course section
//!     anything else                          passed through untouched
//!
//!     Single separators are doubled before parsing (` ^:` → `^^:`, ` | ` → `||`), so authors
//!     write one marker between cells. `{completion:ID}` is replaced by the label of the date
//!     range the user's completion falls in, `-` when there is no completion, or an error marker
//!     when the activity does not exist.
//!
//! Core Algorithm
//!
//!     Rendering is done in explicit passes over a typed representation (./markup/line.rs):
//!     normalize, classify every line, resolve completion tokens inside the classified cells,
//!     then serialize each line. Labels are substituted after classification, so text coming
//!     from the date ranges can never change the table structure.
//!
//!     Lookups never fail a render. A missing activity, section or completion record (or a
//!     lookup that errors) degrades to a visible placeholder.
//!
pub mod blob;
pub mod daterange;
pub mod element;
pub mod error;
pub mod form;
pub mod lookup;
pub mod markup;
pub mod model;
pub mod strings;
pub mod validation;

pub use daterange::{resolve_date_range_label, ChronoDateFormatter, DateFormatter, DateRangeResolver};
pub use element::{CompletionTableElement, Element, SavedElement};
pub use error::{ElementError, LookupError};
pub use form::{FormData, FormField};
pub use lookup::{CompletionLookup, CourseResolver, MemoryStore, SectionLookup};
pub use markup::{render_table, RenderContext};
pub use model::{ActivityId, CourseId, DateRange, TableConfig, Timestamp, UserId, UserRef};
pub use validation::ValidationErrors;
