//! The polymorphic field model.
//!
//! A [`Field`] is one unit of displayable or editable state. Fields live in
//! a [`FieldArena`] for the lifetime of the UI; screens, menus and
//! customizable slots refer to them by [`FieldId`], so the same field can
//! appear on several screens at once.
//!
//! # Sections
//!
//! - Payloads: the per-variant data ([`Editable`], [`Scrollable`], ...)
//! - Field: shared flags plus constructors for every variant
//! - Arena: storage, indirection through customizable slots, text setters

use core::fmt::{self, Write};
use core::ops::{Index, IndexMut};
use core::sync::atomic::{AtomicU8, AtomicU16, AtomicU32, Ordering};

use heapless::{String, Vec};

use crate::config::{MAX_CUSTOM_CHOICES, MAX_FIELD_LEN, MAX_FIELDS, MAX_SCROLLABLE_ENTRIES};
use crate::error::UiError;
use crate::render::CustomRender;
use crate::units::Units;

/// Text owned by a field.
pub type FieldText = String<MAX_FIELD_LEN>;

/// Handle to a field in a [`FieldArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldId(pub(crate) u16);

impl FieldId {
    /// Arena slot index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// An externally owned unsigned scalar an editable reads and commits to.
///
/// Reads are whole-word atomic loads, so a producer updating the value
/// concurrently can make a reading stale but never torn.
#[derive(Clone, Copy)]
pub enum Target<'a> {
    U8(&'a AtomicU8),
    U16(&'a AtomicU16),
    U32(&'a AtomicU32),
}

impl Target<'_> {
    pub fn load(self) -> u32 {
        match self {
            Self::U8(v) => u32::from(v.load(Ordering::Relaxed)),
            Self::U16(v) => u32::from(v.load(Ordering::Relaxed)),
            Self::U32(v) => v.load(Ordering::Relaxed),
        }
    }

    /// Store `value`, truncated to the target width.
    pub fn store(
        self,
        value: u32,
    ) {
        match self {
            Self::U8(v) => v.store(value as u8, Ordering::Relaxed),
            Self::U16(v) => v.store(value as u16, Ordering::Relaxed),
            Self::U32(v) => v.store(value, Ordering::Relaxed),
        }
    }
}

impl<'a> From<&'a AtomicU8> for Target<'a> {
    fn from(v: &'a AtomicU8) -> Self {
        Self::U8(v)
    }
}

impl<'a> From<&'a AtomicU16> for Target<'a> {
    fn from(v: &'a AtomicU16) -> Self {
        Self::U16(v)
    }
}

impl<'a> From<&'a AtomicU32> for Target<'a> {
    fn from(v: &'a AtomicU32) -> Self {
        Self::U32(v)
    }
}

/// How an unsigned number is bounded, stepped and printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat<'a> {
    /// Units in storage terms ("km", "kph", "C", ...).
    pub units: &'a str,
    /// Fixed-point digits: a stored 123 with 1 digit prints as "12.3".
    pub div_digits: u8,
    /// Print only the integer part of a fixed-point value.
    pub hide_fraction: bool,
    pub min: u32,
    pub max: u32,
    /// Increment per edit step, 0 behaves like 1.
    pub step: u32,
}

impl<'a> NumberFormat<'a> {
    pub const fn new(units: &'a str) -> Self {
        Self {
            units,
            div_digits: 0,
            hide_fraction: false,
            min: 0,
            max: u32::MAX,
            step: 1,
        }
    }

    pub const fn range(
        mut self,
        min: u32,
        max: u32,
    ) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub const fn step(
        mut self,
        step: u32,
    ) -> Self {
        self.step = step;
        self
    }

    pub const fn fixed(
        mut self,
        div_digits: u8,
    ) -> Self {
        self.div_digits = div_digits;
        self
    }

    pub const fn hide_fraction(mut self) -> Self {
        self.hide_fraction = true;
        self
    }

    /// Write `value` honoring `div_digits` and `hide_fraction`.
    pub fn write(
        &self,
        out: &mut impl Write,
        value: u32,
    ) -> fmt::Result {
        if self.div_digits == 0 {
            return write!(out, "{value}");
        }
        let div = 10u32.saturating_pow(u32::from(self.div_digits));
        if self.hide_fraction {
            write!(out, "{}", value / div)
        } else {
            write!(out, "{}.{:0width$}", value / div, value % div, width = usize::from(self.div_digits))
        }
    }
}

/// What an editable shows and edits.
pub enum EditValue<'a> {
    /// An unsigned number with bounds and units.
    Number {
        target: Target<'a>,
        format: NumberFormat<'a>,
    },
    /// An index into a list of option names.
    Choice {
        target: &'a AtomicU8,
        options: &'a [&'a str],
    },
    /// A string produced elsewhere, always read-only.
    Text(FieldText),
}

/// Label shown for a choice index nothing maps to.
pub const UNKNOWN_CHOICE: &str = "???";

/// A labelled value bound to external state.
pub struct Editable<'a> {
    pub label: &'a str,
    pub read_only: bool,
    pub value: EditValue<'a>,
}

impl Editable<'_> {
    /// Units string in storage terms, empty for choices and text.
    pub fn units(&self) -> &str {
        match &self.value {
            EditValue::Number { format, .. } => format.units,
            EditValue::Choice { .. } | EditValue::Text(_) => "",
        }
    }

    /// True for unsigned-number editables.
    pub const fn is_number(&self) -> bool {
        matches!(self.value, EditValue::Number { .. })
    }

    /// Units string as shown to the user.
    pub fn display_units(
        &self,
        units: Units,
    ) -> &str {
        units.label(self.units())
    }

    /// Current value in display units: the converted number or the choice
    /// index. Text editables report 0, their changes arrive as dirty marks.
    pub fn display_value(
        &self,
        units: Units,
    ) -> u32 {
        match &self.value {
            EditValue::Number { target, format } => units.to_display(target.load(), format.units),
            EditValue::Choice { target, .. } => u32::from(target.load(Ordering::Relaxed)),
            EditValue::Text(_) => 0,
        }
    }

    /// Render `value` (in display units) as the user sees it.
    pub fn format_value(
        &self,
        value: u32,
    ) -> FieldText {
        let mut out = FieldText::new();
        let mut w = Truncating(&mut out);
        match &self.value {
            EditValue::Number { format, .. } => format.write(&mut w, value).ok(),
            EditValue::Choice { options, .. } => {
                let label = options.get(value as usize).copied().unwrap_or(UNKNOWN_CHOICE);
                w.write_str(label).ok()
            }
            EditValue::Text(text) => w.write_str(text).ok(),
        };
        out
    }

    /// Store `value` (in display units) back into the target.
    pub(crate) fn commit(
        &self,
        value: u32,
        units: Units,
    ) {
        match &self.value {
            EditValue::Number { target, format } => target.store(units.from_display(value, format.units)),
            EditValue::Choice { target, .. } => target.store(value as u8, Ordering::Relaxed),
            EditValue::Text(_) => {}
        }
    }
}

/// A menu of child fields.
pub struct Scrollable<'a> {
    pub label: &'a str,
    /// Children in display order. An `End` field truncates the list.
    pub entries: Vec<FieldId, MAX_SCROLLABLE_ENTRIES>,
    /// First visible child.
    pub first: usize,
    /// Highlighted child.
    pub selected: usize,
}

/// A time series of an editable's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Graph {
    /// Editable that supplies label, units and samples.
    pub source: FieldId,
    /// Samples at or above this draw a warning band.
    pub warn_threshold: Option<i32>,
    /// Samples at or above this draw an error band.
    pub error_threshold: Option<i32>,
    /// Samples below this never lower the running minimum.
    pub min_threshold: i32,
}

/// A slot showing one of several fields, picked by an external index.
pub struct Customizable<'a> {
    /// Index into `choices`, persisted by the application.
    pub selector: &'a AtomicU8,
    pub choices: Vec<FieldId, MAX_CUSTOM_CHOICES>,
}

impl Customizable<'_> {
    /// Index of the active choice. A stale selector falls back to the first one.
    pub fn active_index(&self) -> usize {
        let i = usize::from(self.selector.load(Ordering::Relaxed));
        if i < self.choices.len() { i } else { 0 }
    }

    pub fn active(&self) -> FieldId {
        self.choices[self.active_index()]
    }
}

/// Variant payload of a field.
pub enum FieldKind<'a> {
    /// Text owned by the field, see [`FieldArena::set_text`].
    DrawText(FieldText),
    /// Text owned elsewhere.
    DrawTextPtr(&'a str),
    Fill,
    /// Checkerboard fill.
    Mesh,
    Scrollable(Scrollable<'a>),
    Editable(Editable<'a>),
    Custom(&'a dyn CustomRender),
    Graph(Graph),
    Customizable(Customizable<'a>),
    /// Terminates a scrollable's entries. Never rendered.
    End,
}

/// Variant tag without payload, for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    DrawText,
    DrawTextPtr,
    Fill,
    Mesh,
    Scrollable,
    Editable,
    Custom,
    Graph,
    Customizable,
    End,
}

// =============================================================================
// Field
// =============================================================================

/// Content plus the transient flags the renderer works from.
pub struct Field<'a> {
    pub kind: FieldKind<'a>,
    /// Redraw on the next pass even if nothing else changed.
    pub dirty: bool,
    /// Redraw on every blink phase flip.
    pub blink: bool,
    /// Highlighted by a menu (drawn with the selection cursor).
    pub is_selected: bool,
}

impl<'a> Field<'a> {
    const fn with_kind(kind: FieldKind<'a>) -> Self {
        Self {
            kind,
            dirty: false,
            blink: false,
            is_selected: false,
        }
    }

    /// Owned text. Longer input is truncated at a character boundary.
    pub fn text(text: &str) -> Self {
        Self::with_kind(FieldKind::DrawText(truncated(text)))
    }

    /// Borrowed text.
    pub const fn text_ptr(text: &'a str) -> Self {
        Self::with_kind(FieldKind::DrawTextPtr(text))
    }

    pub const fn fill() -> Self {
        Self::with_kind(FieldKind::Fill)
    }

    pub const fn mesh() -> Self {
        Self::with_kind(FieldKind::Mesh)
    }

    pub const fn end() -> Self {
        Self::with_kind(FieldKind::End)
    }

    /// A menu of `entries`.
    pub fn scrollable(
        label: &'a str,
        entries: &[FieldId],
    ) -> Result<Self, UiError> {
        let entries = Vec::from_slice(entries).map_err(|_| UiError::TooManyEntries)?;
        Ok(Self::with_kind(FieldKind::Scrollable(Scrollable {
            label,
            entries,
            first: 0,
            selected: 0,
        })))
    }

    /// An editable unsigned number.
    pub fn number(
        label: &'a str,
        target: impl Into<Target<'a>>,
        format: NumberFormat<'a>,
    ) -> Self {
        Self::with_kind(FieldKind::Editable(Editable {
            label,
            read_only: false,
            value: EditValue::Number {
                target: target.into(),
                format,
            },
        }))
    }

    /// A read-only unsigned number.
    pub fn readonly_number(
        label: &'a str,
        target: impl Into<Target<'a>>,
        format: NumberFormat<'a>,
    ) -> Self {
        let mut field = Self::number(label, target, format);
        field.set_read_only();
        field
    }

    /// An editable choice among `options`.
    pub fn choice(
        label: &'a str,
        target: &'a AtomicU8,
        options: &'a [&'a str],
    ) -> Self {
        Self::with_kind(FieldKind::Editable(Editable {
            label,
            read_only: false,
            value: EditValue::Choice { target, options },
        }))
    }

    /// A read-only string, updated with [`FieldArena::set_read_only_str`].
    pub fn readonly_str(
        label: &'a str,
        initial: &str,
    ) -> Self {
        Self::with_kind(FieldKind::Editable(Editable {
            label,
            read_only: true,
            value: EditValue::Text(truncated(initial)),
        }))
    }

    pub const fn custom(render: &'a dyn CustomRender) -> Self {
        Self::with_kind(FieldKind::Custom(render))
    }

    /// A graph of `source`, which must be a number editable.
    pub const fn graph(
        source: FieldId,
        warn_threshold: Option<i32>,
        error_threshold: Option<i32>,
        min_threshold: i32,
    ) -> Self {
        let mut field = Self::with_kind(FieldKind::Graph(Graph {
            source,
            warn_threshold,
            error_threshold,
            min_threshold,
        }));
        // graphs are polled on every blink tick
        field.blink = true;
        field
    }

    /// A slot showing `choices[selector]`.
    ///
    /// # Panics
    ///
    /// Panics if `choices` is empty.
    pub fn customizable(
        selector: &'a AtomicU8,
        choices: &[FieldId],
    ) -> Result<Self, UiError> {
        assert!(!choices.is_empty(), "customizable needs at least one choice");
        let choices = Vec::from_slice(choices).map_err(|_| UiError::TooManyChoices)?;
        Ok(Self::with_kind(FieldKind::Customizable(Customizable { selector, choices })))
    }

    fn set_read_only(&mut self) {
        if let FieldKind::Editable(editable) = &mut self.kind {
            editable.read_only = true;
        }
    }

    pub const fn variant(&self) -> Variant {
        match self.kind {
            FieldKind::DrawText(_) => Variant::DrawText,
            FieldKind::DrawTextPtr(_) => Variant::DrawTextPtr,
            FieldKind::Fill => Variant::Fill,
            FieldKind::Mesh => Variant::Mesh,
            FieldKind::Scrollable(_) => Variant::Scrollable,
            FieldKind::Editable(_) => Variant::Editable,
            FieldKind::Custom(_) => Variant::Custom,
            FieldKind::Graph(_) => Variant::Graph,
            FieldKind::Customizable(_) => Variant::Customizable,
            FieldKind::End => Variant::End,
        }
    }

    pub const fn as_editable(&self) -> Option<&Editable<'a>> {
        match &self.kind {
            FieldKind::Editable(editable) => Some(editable),
            _ => None,
        }
    }

    pub const fn as_scrollable(&self) -> Option<&Scrollable<'a>> {
        match &self.kind {
            FieldKind::Scrollable(scrollable) => Some(scrollable),
            _ => None,
        }
    }

    pub fn as_scrollable_mut(&mut self) -> Option<&mut Scrollable<'a>> {
        match &mut self.kind {
            FieldKind::Scrollable(scrollable) => Some(scrollable),
            _ => None,
        }
    }
}

/// Copy `text` into a field buffer, cutting at the last char that fits.
fn truncated(text: &str) -> FieldText {
    let mut out = FieldText::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// `fmt::Write` adapter that drops whatever does not fit.
struct Truncating<'s>(&'s mut FieldText);

impl Write for Truncating<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format into a field buffer, truncating instead of failing.
pub fn format_text(args: fmt::Arguments<'_>) -> FieldText {
    let mut out = FieldText::new();
    Truncating(&mut out).write_fmt(args).ok();
    out
}

// =============================================================================
// Arena
// =============================================================================

/// Internal field: heading row of the expanded menu.
pub(crate) const HEADING: FieldId = FieldId(0);
/// Internal field: label of a collapsed menu.
pub(crate) const MENU_LABEL: FieldId = FieldId(1);
/// Internal field: filler for menu rows past the last entry.
pub(crate) const BLANK_ROW: FieldId = FieldId(2);
/// Shared end marker for menus that want one.
pub const END: FieldId = FieldId(3);

const RESERVED: usize = 4;

/// Owns every field of the UI.
pub struct FieldArena<'a> {
    fields: Vec<Field<'a>, MAX_FIELDS>,
}

impl<'a> FieldArena<'a> {
    pub fn new() -> Self {
        let mut fields = Vec::new();
        for field in [Field::text(""), Field::text(""), Field::fill(), Field::end()] {
            // capacity is far above the reserved slots
            fields.push(field).ok();
        }
        debug_assert_eq!(fields.len(), RESERVED);
        Self { fields }
    }

    /// Store `field`, returning its handle.
    pub fn add(
        &mut self,
        field: Field<'a>,
    ) -> Result<FieldId, UiError> {
        let id = FieldId(self.fields.len() as u16);
        self.fields.push(field).map_err(|_| UiError::TooManyFields)?;
        Ok(id)
    }

    /// Number of stored fields, internal ones included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when only the internal fields exist.
    pub fn is_empty(&self) -> bool {
        self.fields.len() == RESERVED
    }

    /// Follow one level of customizable indirection.
    ///
    /// Returns the field to draw and, when redirected, the slot it came from.
    ///
    /// # Panics
    ///
    /// Panics if a customizable's active choice is another customizable.
    pub fn resolve(
        &self,
        id: FieldId,
    ) -> (FieldId, Option<FieldId>) {
        match &self[id].kind {
            FieldKind::Customizable(slot) => {
                let choice = slot.active();
                assert!(
                    !matches!(self[choice].kind, FieldKind::Customizable(_)),
                    "customizable slots cannot nest"
                );
                (choice, Some(id))
            }
            _ => (id, None),
        }
    }

    /// Replace a text field's content, marking it dirty only on change.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a `DrawText` field.
    pub fn set_text(
        &mut self,
        id: FieldId,
        args: fmt::Arguments<'_>,
    ) {
        let text = format_text(args);
        let field = &mut self[id];
        let FieldKind::DrawText(current) = &mut field.kind else {
            panic!("set_text on a non-text field");
        };
        if *current != text {
            *current = text;
            field.dirty = true;
        }
    }

    /// Replace a read-only string editable, marking it dirty only on change.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a read-only string editable.
    pub fn set_read_only_str(
        &mut self,
        id: FieldId,
        text: &str,
    ) {
        let text = truncated(text);
        let field = &mut self[id];
        let FieldKind::Editable(Editable {
            value: EditValue::Text(current),
            ..
        }) = &mut field.kind
        else {
            panic!("set_read_only_str on a field that is not a read-only string");
        };
        if *current != text {
            *current = text;
            field.dirty = true;
        }
    }

    /// Entries of a scrollable up to its first `End` marker.
    pub fn entry_count(
        &self,
        scrollable: FieldId,
    ) -> usize {
        let Some(s) = self[scrollable].as_scrollable() else {
            return 0;
        };
        s.entries
            .iter()
            .position(|e| matches!(self[*e].kind, FieldKind::End))
            .unwrap_or(s.entries.len())
    }

    /// The entry a scrollable currently highlights.
    pub fn selected_entry(
        &self,
        scrollable: FieldId,
    ) -> Option<FieldId> {
        let s = self[scrollable].as_scrollable()?;
        s.entries.get(s.selected).copied()
    }

    /// Iterate over every field with its handle.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &Field<'a>)> {
        self.fields.iter().enumerate().map(|(i, f)| (FieldId(i as u16), f))
    }
}

impl Default for FieldArena<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Index<FieldId> for FieldArena<'a> {
    type Output = Field<'a>;

    fn index(
        &self,
        id: FieldId,
    ) -> &Self::Output {
        &self.fields[id.index()]
    }
}

impl IndexMut<FieldId> for FieldArena<'_> {
    fn index_mut(
        &mut self,
        id: FieldId,
    ) -> &mut Self::Output {
        &mut self.fields[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_fields() {
        let arena = FieldArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena[HEADING].variant(), Variant::DrawText);
        assert_eq!(arena[BLANK_ROW].variant(), Variant::Fill);
        assert_eq!(arena[END].variant(), Variant::End);
    }

    #[test]
    fn test_add_returns_sequential_ids() {
        let mut arena = FieldArena::new();
        let a = arena.add(Field::fill()).unwrap();
        let b = arena.add(Field::mesh()).unwrap();
        assert_eq!(b.index(), a.index() + 1);
        assert_eq!(arena[b].variant(), Variant::Mesh);
    }

    #[test]
    fn test_arena_full() {
        let mut arena = FieldArena::new();
        while arena.len() < MAX_FIELDS {
            arena.add(Field::fill()).unwrap();
        }
        assert_eq!(arena.add(Field::fill()).err(), Some(UiError::TooManyFields));
    }

    #[test]
    fn test_set_text_marks_dirty_only_on_change() {
        let mut arena = FieldArena::new();
        let id = arena.add(Field::text("")).unwrap();

        arena.set_text(id, format_args!("{}%", 42));
        assert!(arena[id].dirty);
        arena[id].dirty = false;

        arena.set_text(id, format_args!("{}%", 42));
        assert!(!arena[id].dirty);

        arena.set_text(id, format_args!("{}%", 43));
        assert!(arena[id].dirty);
    }

    #[test]
    fn test_set_text_truncates() {
        let mut arena = FieldArena::new();
        let id = arena.add(Field::text("")).unwrap();
        arena.set_text(id, format_args!("{:0>40}", 1));
        let FieldKind::DrawText(text) = &arena[id].kind else {
            panic!("expected text");
        };
        assert_eq!(text.len(), MAX_FIELD_LEN);
    }

    #[test]
    fn test_set_read_only_str() {
        let mut arena = FieldArena::new();
        let id = arena.add(Field::readonly_str("trip time", "unset")).unwrap();
        assert!(arena[id].as_editable().unwrap().read_only);

        arena.set_read_only_str(id, "unset");
        assert!(!arena[id].dirty);
        arena.set_read_only_str(id, "1:05");
        assert!(arena[id].dirty);
    }

    #[test]
    #[should_panic(expected = "non-text")]
    fn test_set_text_on_fill_panics() {
        let mut arena = FieldArena::new();
        let id = arena.add(Field::fill()).unwrap();
        arena.set_text(id, format_args!("x"));
    }

    #[test]
    fn test_resolve_follows_customizable() {
        static SELECTOR: AtomicU8 = AtomicU8::new(1);
        let mut arena = FieldArena::new();
        let a = arena.add(Field::text("a")).unwrap();
        let b = arena.add(Field::text("b")).unwrap();
        let slot = arena.add(Field::customizable(&SELECTOR, &[a, b]).unwrap()).unwrap();

        assert_eq!(arena.resolve(slot), (b, Some(slot)));
        assert_eq!(arena.resolve(a), (a, None));
    }

    #[test]
    fn test_stale_selector_falls_back_to_first_choice() {
        static SELECTOR: AtomicU8 = AtomicU8::new(9);
        let mut arena = FieldArena::new();
        let a = arena.add(Field::fill()).unwrap();
        let slot = arena.add(Field::customizable(&SELECTOR, &[a]).unwrap()).unwrap();
        assert_eq!(arena.resolve(slot).0, a);
    }

    #[test]
    fn test_entry_count_stops_at_end_marker() {
        let mut arena = FieldArena::new();
        let a = arena.add(Field::fill()).unwrap();
        let b = arena.add(Field::fill()).unwrap();
        let menu = arena.add(Field::scrollable("menu", &[a, b, END, a]).unwrap()).unwrap();
        assert_eq!(arena.entry_count(menu), 2);
        assert_eq!(arena.selected_entry(menu), Some(a));
    }

    #[test]
    fn test_number_format() {
        let mut out = FieldText::new();
        NumberFormat::new("km").fixed(1).write(&mut out, 1234).unwrap();
        assert_eq!(out.as_str(), "123.4");

        out.clear();
        NumberFormat::new("km").fixed(2).write(&mut out, 5).unwrap();
        assert_eq!(out.as_str(), "0.05");

        out.clear();
        NumberFormat::new("kph").fixed(1).hide_fraction().write(&mut out, 257).unwrap();
        assert_eq!(out.as_str(), "25");
    }

    #[test]
    fn test_choice_out_of_range_shows_fallback() {
        static MODE: AtomicU8 = AtomicU8::new(7);
        let field = Field::choice("units", &MODE, &["metric", "imperial"]);
        let editable = field.as_editable().unwrap();
        assert_eq!(editable.display_value(Units::METRIC), 7);
        assert_eq!(editable.format_value(7).as_str(), UNKNOWN_CHOICE);
        assert_eq!(editable.format_value(1).as_str(), "imperial");
    }

    #[test]
    fn test_number_display_converts_units() {
        static SPEED: AtomicU16 = AtomicU16::new(161);
        let field = Field::readonly_number("speed", &SPEED, NumberFormat::new("kph"));
        let editable = field.as_editable().unwrap();
        assert_eq!(editable.display_value(Units::METRIC), 161);
        assert_eq!(editable.display_value(Units::IMPERIAL), 100);
        assert_eq!(editable.display_units(Units::IMPERIAL), "mph");

        editable.commit(50, Units::IMPERIAL);
        assert_eq!(SPEED.load(Ordering::Relaxed), 81);
    }

    #[test]
    fn test_target_truncates_on_store() {
        static BYTE: AtomicU8 = AtomicU8::new(0);
        let target = Target::from(&BYTE);
        target.store(0x1_05);
        assert_eq!(target.load(), 5);
    }
}
