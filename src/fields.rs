//! Form fields placed on document files.
//!
//! [`FormField`] is a closed sum type discriminated on the wire by a `type`
//! tag. Every variant embeds a [`Placement`]; optional capabilities
//! (signer assignment, required flag, read-only flag, input validation,
//! text styling) are embedded by value and exposed through the [`Signable`],
//! [`Requireable`], [`Readable`], [`Validable`] and [`TextStyled`] traits.

use crate::error::{EversignError, Result};
use crate::wire;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed edge length of checkbox and radio fields, in pixels.
pub const CHECKBOX_SIZE: u32 = 14;

/// Signer id of fields nobody has been assigned to yet.
pub const DEFAULT_SIGNER: &str = "OWNER";

// =============================================================================
// DISCRIMINATOR TABLE
// =============================================================================

/// The concrete kind of a [`FormField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Signature,
    Initials,
    DateSigned,
    Note,
    Text,
    Checkbox,
    CheckboxGroup,
    Radio,
    Dropdown,
    Attachment,
}

/// Every kind with its wire tag and type name.
static FIELD_KINDS: [(FieldKind, &str, &str); 10] = [
    (FieldKind::Signature, "signature", "SignatureField"),
    (FieldKind::Initials, "initials", "InitialsField"),
    (FieldKind::DateSigned, "date_signed", "DateSignedField"),
    (FieldKind::Note, "note", "NoteField"),
    (FieldKind::Text, "text", "TextField"),
    (FieldKind::Checkbox, "checkbox", "CheckboxField"),
    (FieldKind::CheckboxGroup, "checkboxGroup", "CheckboxGroupField"),
    (FieldKind::Radio, "radio", "RadioField"),
    (FieldKind::Dropdown, "dropdown", "DropdownField"),
    (FieldKind::Attachment, "attachment", "AttachmentField"),
];

impl FieldKind {
    /// All kinds, in discriminator-table order.
    pub fn all() -> impl Iterator<Item = FieldKind> {
        FIELD_KINDS.iter().map(|(kind, _, _)| *kind)
    }

    /// Resolve a `type` discriminator.
    pub fn from_tag(tag: &str) -> Option<FieldKind> {
        FIELD_KINDS
            .iter()
            .find(|(_, t, _)| *t == tag)
            .map(|(kind, _, _)| *kind)
    }

    /// The `type` discriminator used on the wire.
    pub fn tag(&self) -> &'static str {
        self.entry().1
    }

    /// Type name used when generating identifiers, e.g. `SignatureField`.
    pub fn type_name(&self) -> &'static str {
        self.entry().2
    }

    fn entry(&self) -> &'static (FieldKind, &'static str, &'static str) {
        FIELD_KINDS
            .iter()
            .find(|(kind, _, _)| kind == self)
            .unwrap_or(&FIELD_KINDS[0])
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// CAPABILITY GROUPS
// =============================================================================

/// Position and size shared by every field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Placement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(skip)]
    file_index: usize,
}

impl Placement {
    fn sized(width: u32, height: u32) -> Self {
        Self {
            identifier: None,
            page: 1,
            width,
            height,
            x: 0.0,
            y: 0.0,
            file_index: 0,
        }
    }

    fn is_complete(&self) -> bool {
        self.page != 0 && self.width != 0 && self.height != 0 && self.x != 0.0 && self.y != 0.0
    }
}

/// Signer assignment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Signing {
    #[serde(
        default,
        with = "wire::opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    signer: Option<String>,
}

impl Default for Signing {
    /// New fields belong to the document owner until assigned to a signer.
    fn default() -> Self {
        Self {
            signer: Some(DEFAULT_SIGNER.to_string()),
        }
    }
}

/// Required flag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Requirement {
    #[serde(default, with = "wire::int_bool")]
    required: bool,
}

/// Read-only flag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ReadOnly {
    #[serde(default, with = "wire::int_bool")]
    read_only: bool,
}

/// Input validation rule for text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValidation {
    LettersOnly,
    NumbersOnly,
    EmailAddress,
}

/// Input validation setting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Validation {
    #[serde(
        default,
        alias = "field_validation",
        skip_serializing_if = "Option::is_none"
    )]
    validation_type: Option<FieldValidation>,
}

/// Fonts the service renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    #[default]
    Arial,
    Calibri,
    CourierNew,
    Helvetica,
    Georgia,
}

impl Font {
    pub fn as_str(&self) -> &'static str {
        match self {
            Font::Arial => "arial",
            Font::Calibri => "calibri",
            Font::CourierNew => "courier_new",
            Font::Helvetica => "helvetica",
            Font::Georgia => "georgia",
        }
    }
}

impl FromStr for Font {
    type Err = EversignError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "arial" => Ok(Font::Arial),
            "calibri" => Ok(Font::Calibri),
            "courier_new" => Ok(Font::CourierNew),
            "helvetica" => Ok(Font::Helvetica),
            "georgia" => Ok(Font::Georgia),
            other => Err(EversignError::invalid(format!(
                "The selected Font is not available for this Property: {other}"
            ))),
        }
    }
}

/// Text styling for fields that render text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextFormat {
    #[serde(default)]
    text_size: u32,
    #[serde(default)]
    text_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_style: Option<String>,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            text_size: 14,
            text_color: "#000000".to_string(),
            text_font: Some(Font::Arial),
            text_style: Some(String::new()),
        }
    }
}

impl TextFormat {
    fn is_complete(&self) -> bool {
        self.text_size != 0
            && !self.text_color.is_empty()
            && self.text_font.is_some()
            && self.text_style.is_some()
    }
}

// =============================================================================
// CAPABILITY TRAITS
// =============================================================================

/// Base behavior of every field: placement, identifier and validation.
pub trait Positioned {
    fn kind(&self) -> FieldKind;
    fn placement(&self) -> &Placement;
    fn placement_mut(&mut self) -> &mut Placement;

    /// Text styling, for the variants that carry it.
    fn text_format(&self) -> Option<&TextFormat> {
        None
    }

    fn identifier(&self) -> Option<&str> {
        self.placement().identifier.as_deref()
    }

    fn set_identifier(&mut self, identifier: &str) {
        self.placement_mut().identifier = Some(identifier.to_string());
    }

    /// Page number, starting at 1.
    fn page(&self) -> u32 {
        self.placement().page
    }

    fn set_page(&mut self, page: u32) {
        self.placement_mut().page = page;
    }

    fn width(&self) -> u32 {
        self.placement().width
    }

    fn set_width(&mut self, width: u32) -> Result<()> {
        self.placement_mut().width = width;
        Ok(())
    }

    fn height(&self) -> u32 {
        self.placement().height
    }

    fn set_height(&mut self, height: u32) -> Result<()> {
        self.placement_mut().height = height;
        Ok(())
    }

    /// Distance from the left edge, in pixels.
    fn x(&self) -> f64 {
        self.placement().x
    }

    fn set_x(&mut self, x: f64) {
        self.placement_mut().x = x;
    }

    /// Distance from the top edge, in pixels.
    fn y(&self) -> f64 {
        self.placement().y
    }

    fn set_y(&mut self, y: f64) {
        self.placement_mut().y = y;
    }

    /// Index of the document file the field is placed on. Not sent to the
    /// API; the position in the document's field list encodes it.
    fn file_index(&self) -> usize {
        self.placement().file_index
    }

    fn set_file_index(&mut self, file_index: usize) {
        self.placement_mut().file_index = file_index;
    }

    /// True when page, size and position are set, and text styling is
    /// complete for text-rendering fields.
    fn validate(&self) -> bool {
        self.placement().is_complete() && self.text_format().is_none_or(TextFormat::is_complete)
    }
}

/// Fields assigned to a signer.
pub trait Signable {
    fn signing(&self) -> &Signing;
    fn signing_mut(&mut self) -> &mut Signing;

    /// Id of the signer who fills the field.
    fn signer(&self) -> Option<&str> {
        self.signing().signer.as_deref()
    }

    fn set_signer(&mut self, signer: &str) {
        self.signing_mut().signer = Some(signer.to_string());
    }
}

/// Fields that can be marked required.
pub trait Requireable {
    fn requirement(&self) -> &Requirement;
    fn requirement_mut(&mut self) -> &mut Requirement;

    fn required(&self) -> bool {
        self.requirement().required
    }

    fn set_required(&mut self, required: bool) {
        self.requirement_mut().required = required;
    }
}

/// Fields that can be locked against editing.
pub trait Readable {
    fn read_only_flag(&self) -> &ReadOnly;
    fn read_only_flag_mut(&mut self) -> &mut ReadOnly;

    fn read_only(&self) -> bool {
        self.read_only_flag().read_only
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only_flag_mut().read_only = read_only;
    }
}

/// Fields that validate what the signer types.
pub trait Validable {
    fn validation(&self) -> &Validation;
    fn validation_mut(&mut self) -> &mut Validation;

    fn validation_type(&self) -> Option<FieldValidation> {
        self.validation().validation_type
    }

    fn set_validation_type(&mut self, validation_type: Option<FieldValidation>) {
        self.validation_mut().validation_type = validation_type;
    }
}

/// Fields that render styled text.
pub trait TextStyled {
    fn format(&self) -> &TextFormat;
    fn format_mut(&mut self) -> &mut TextFormat;

    fn text_size(&self) -> u32 {
        self.format().text_size
    }

    /// Font size in points. `0` leaves the size unset.
    fn set_text_size(&mut self, size: u32) {
        self.format_mut().text_size = size;
    }

    fn text_color(&self) -> &str {
        &self.format().text_color
    }

    /// Hex color code such as `#003399`.
    fn set_text_color(&mut self, color: &str) -> Result<()> {
        let valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(EversignError::invalid(format!(
                "Text color must be a hex color code like #003399: {color}"
            )));
        }
        self.format_mut().text_color = color.to_string();
        Ok(())
    }

    fn text_font(&self) -> Option<Font> {
        self.format().text_font
    }

    /// Font by name. Fails for fonts the service does not render.
    fn set_text_font(&mut self, font: &str) -> Result<()> {
        self.format_mut().text_font = Some(font.parse()?);
        Ok(())
    }

    fn text_style(&self) -> Option<&str> {
        self.format().text_style.as_deref()
    }

    /// Any combination of `B` (bold), `U` (underline) and `I` (italic).
    fn set_text_style(&mut self, style: &str) -> Result<()> {
        let mut seen = Vec::with_capacity(3);
        for c in style.chars() {
            if !matches!(c, 'B' | 'U' | 'I') || seen.contains(&c) {
                return Err(EversignError::invalid(format!(
                    "Text style may only combine B, U and I: {style}"
                )));
            }
            seen.push(c);
        }
        self.format_mut().text_style = Some(style.to_string());
        Ok(())
    }
}

// =============================================================================
// VARIANTS
// =============================================================================

/// Signature box.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SignatureField {
    #[serde(flatten)]
    placement: Placement,
    #[serde(flatten)]
    signing: Signing,
    #[serde(flatten)]
    requirement: Requirement,
}

impl Default for SignatureField {
    fn default() -> Self {
        Self {
            placement: Placement::sized(120, 35),
            signing: Signing::default(),
            requirement: Requirement::default(),
        }
    }
}

/// Initials box.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InitialsField {
    #[serde(flatten)]
    placement: Placement,
    #[serde(flatten)]
    signing: Signing,
    #[serde(flatten)]
    requirement: Requirement,
}

impl Default for InitialsField {
    fn default() -> Self {
        Self {
            placement: Placement::sized(43, 43),
            signing: Signing::default(),
            requirement: Requirement::default(),
        }
    }
}

/// Date the signer signed, filled in automatically.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DateSignedField {
    #[serde(flatten)]
    placement: Placement,
    #[serde(flatten)]
    signing: Signing,
    #[serde(flatten)]
    format: TextFormat,
}

impl Default for DateSignedField {
    fn default() -> Self {
        Self {
            placement: Placement::sized(120, 19),
            signing: Signing::default(),
            format: TextFormat::default(),
        }
    }
}

/// Free-form note a signer can leave on the page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NoteField {
    #[serde(flatten)]
    placement: Placement,
    #[serde(flatten)]
    signing: Signing,
    #[serde(flatten)]
    requirement: Requirement,
    #[serde(flatten)]
    read_only: ReadOnly,
    #[serde(flatten)]
    format: TextFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl Default for NoteField {
    fn default() -> Self {
        Self {
            placement: Placement::sized(60, 60),
            signing: Signing::default(),
            requirement: Requirement::default(),
            read_only: ReadOnly::default(),
            format: TextFormat::default(),
            value: None,
        }
    }
}

impl NoteField {
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }
}

/// Single-line text input.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextField {
    #[serde(flatten)]
    placement: Placement,
    #[serde(flatten)]
    signing: Signing,
    #[serde(flatten)]
    requirement: Requirement,
    #[serde(flatten)]
    read_only: ReadOnly,
    #[serde(flatten)]
    validation: Validation,
    #[serde(flatten)]
    format: TextFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            placement: Placement::sized(120, 19),
            signing: Signing::default(),
            requirement: Requirement::default(),
            read_only: ReadOnly::default(),
            validation: Validation::default(),
            format: TextFormat::default(),
            name: None,
            value: None,
        }
    }
}

impl TextField {
    /// Label shown to the signer.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Prefilled text.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }
}

/// Checkbox with a fixed 14x14 size.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CheckboxField {
    #[serde(flatten)]
    placement: Placement,
    #[serde(flatten)]
    signing: Signing,
    #[serde(flatten)]
    requirement: Requirement,
    #[serde(flatten)]
    read_only: ReadOnly,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, with = "wire::flag_string")]
    value: bool,
}

impl Default for CheckboxField {
    fn default() -> Self {
        Self {
            placement: Placement::sized(CHECKBOX_SIZE, CHECKBOX_SIZE),
            signing: Signing::default(),
            requirement: Requirement::default(),
            read_only: ReadOnly::default(),
            name: None,
            value: false,
        }
    }
}

fn parse_checked(value: &str, what: &str) -> Result<bool> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(EversignError::invalid(format!(
            "{what} Value can only be 0 or 1, got {other:?}"
        ))),
    }
}

fn fixed_size_error(what: &str) -> EversignError {
    EversignError::invalid(format!(
        "{what} have a fixed width and height of {CHECKBOX_SIZE} that cannot be changed"
    ))
}

impl CheckboxField {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// `"1"` when checked, `"0"` otherwise.
    pub fn value(&self) -> &'static str {
        if self.value { "1" } else { "0" }
    }

    /// Accepts only `"0"` and `"1"`.
    pub fn set_value(&mut self, value: &str) -> Result<()> {
        self.value = parse_checked(value, "Checkbox")?;
        Ok(())
    }

    pub fn is_checked(&self) -> bool {
        self.value
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.value = checked;
    }
}

/// Checkbox belonging to a group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CheckboxGroupField {
    #[serde(flatten)]
    checkbox: CheckboxField,
    #[serde(
        default,
        with = "wire::opt_lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    group: Option<i64>,
}

impl CheckboxGroupField {
    /// The plain checkbox part.
    pub fn checkbox(&self) -> &CheckboxField {
        &self.checkbox
    }

    pub fn checkbox_mut(&mut self) -> &mut CheckboxField {
        &mut self.checkbox
    }

    /// Group id. Fields with the same id belong together.
    pub fn group(&self) -> i64 {
        self.group.unwrap_or(0)
    }

    pub fn set_group(&mut self, group: i64) {
        self.group = Some(group);
    }
}

/// Radio button with a fixed 14x14 size.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RadioField {
    #[serde(flatten)]
    placement: Placement,
    #[serde(flatten)]
    signing: Signing,
    #[serde(flatten)]
    requirement: Requirement,
    #[serde(flatten)]
    read_only: ReadOnly,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, with = "wire::flag_string")]
    value: bool,
    #[serde(default, with = "wire::opt_lenient_int")]
    group: Option<i64>,
}

impl Default for RadioField {
    fn default() -> Self {
        Self {
            placement: Placement::sized(CHECKBOX_SIZE, CHECKBOX_SIZE),
            signing: Signing::default(),
            requirement: Requirement::default(),
            read_only: ReadOnly::default(),
            name: None,
            value: false,
            group: Some(0),
        }
    }
}

impl RadioField {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn value(&self) -> &'static str {
        if self.value { "1" } else { "0" }
    }

    /// Accepts only `"0"` and `"1"`.
    pub fn set_value(&mut self, value: &str) -> Result<()> {
        self.value = parse_checked(value, "Radio")?;
        Ok(())
    }

    pub fn is_selected(&self) -> bool {
        self.value
    }

    pub fn group(&self) -> i64 {
        self.group.unwrap_or(0)
    }

    /// Radio buttons with the same group id are mutually exclusive.
    pub fn set_group(&mut self, group: i64) {
        self.group = Some(group);
    }
}

/// Dropdown: a text field restricted to a list of options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DropdownField {
    #[serde(flatten)]
    text: TextField,
    #[serde(default)]
    options: Vec<String>,
}

impl Default for DropdownField {
    fn default() -> Self {
        let mut text = TextField::default();
        text.placement.width = 63;
        text.placement.height = 19;
        Self {
            text,
            options: Vec::new(),
        }
    }
}

impl DropdownField {
    /// The text field part (name, value, validation).
    pub fn text(&self) -> &TextField {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextField {
        &mut self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn set_options<I, S>(&mut self, options: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
    }

    /// Pre-selected option, if any.
    pub fn selected(&self) -> Option<&str> {
        self.text.value()
    }

    /// Pre-select a value. Once options are set it must be one of them.
    pub fn set_selected(&mut self, value: &str) -> Result<()> {
        if !self.options.is_empty() && !self.options.iter().any(|o| o == value) {
            return Err(EversignError::invalid(format!(
                "Dropdown value {value:?} is not one of the options"
            )));
        }
        self.text.set_value(value);
        Ok(())
    }
}

/// Lets the signer attach files.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AttachmentField {
    #[serde(flatten)]
    placement: Placement,
    #[serde(flatten)]
    signing: Signing,
    #[serde(flatten)]
    requirement: Requirement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Default for AttachmentField {
    fn default() -> Self {
        Self {
            placement: Placement::sized(28, 28),
            signing: Signing::default(),
            requirement: Requirement::default(),
            name: None,
        }
    }
}

impl AttachmentField {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

// =============================================================================
// TRAIT WIRING
// =============================================================================

macro_rules! positioned {
    (@impl $ty:ty, $kind:expr, $($place:ident).+, { $($extra:item)* }) => {
        impl Positioned for $ty {
            fn kind(&self) -> FieldKind {
                $kind
            }

            fn placement(&self) -> &Placement {
                &self.$($place).+
            }

            fn placement_mut(&mut self) -> &mut Placement {
                &mut self.$($place).+
            }

            $($extra)*
        }
    };
    ($ty:ty, $kind:expr, $($place:ident).+) => {
        positioned!(@impl $ty, $kind, $($place).+, {});
    };
    ($ty:ty, $kind:expr, $($place:ident).+, text: $($fmt:ident).+) => {
        positioned!(@impl $ty, $kind, $($place).+, {
            fn text_format(&self) -> Option<&TextFormat> {
                Some(&self.$($fmt).+)
            }
        });
    };
}

positioned!(SignatureField, FieldKind::Signature, placement);
positioned!(InitialsField, FieldKind::Initials, placement);
positioned!(DateSignedField, FieldKind::DateSigned, placement, text: format);
positioned!(NoteField, FieldKind::Note, placement, text: format);
positioned!(TextField, FieldKind::Text, placement, text: format);
positioned!(DropdownField, FieldKind::Dropdown, text.placement, text: text.format);
positioned!(AttachmentField, FieldKind::Attachment, placement);

impl Positioned for CheckboxField {
    fn kind(&self) -> FieldKind {
        FieldKind::Checkbox
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    fn width(&self) -> u32 {
        CHECKBOX_SIZE
    }

    fn height(&self) -> u32 {
        CHECKBOX_SIZE
    }

    fn set_width(&mut self, _width: u32) -> Result<()> {
        Err(fixed_size_error("CheckboxFields"))
    }

    fn set_height(&mut self, _height: u32) -> Result<()> {
        Err(fixed_size_error("CheckboxFields"))
    }
}

impl Positioned for CheckboxGroupField {
    fn kind(&self) -> FieldKind {
        FieldKind::CheckboxGroup
    }

    fn placement(&self) -> &Placement {
        &self.checkbox.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.checkbox.placement
    }

    fn width(&self) -> u32 {
        CHECKBOX_SIZE
    }

    fn height(&self) -> u32 {
        CHECKBOX_SIZE
    }

    fn set_width(&mut self, _width: u32) -> Result<()> {
        Err(fixed_size_error("CheckboxGroupFields"))
    }

    fn set_height(&mut self, _height: u32) -> Result<()> {
        Err(fixed_size_error("CheckboxGroupFields"))
    }
}

impl Positioned for RadioField {
    fn kind(&self) -> FieldKind {
        FieldKind::Radio
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    fn width(&self) -> u32 {
        CHECKBOX_SIZE
    }

    fn height(&self) -> u32 {
        CHECKBOX_SIZE
    }

    fn set_width(&mut self, _width: u32) -> Result<()> {
        Err(fixed_size_error("RadioFields"))
    }

    fn set_height(&mut self, _height: u32) -> Result<()> {
        Err(fixed_size_error("RadioFields"))
    }
}

macro_rules! capability {
    ($trait:ident, $group:ty, $get:ident, $get_mut:ident => $($ty:ty: $($path:ident).+),+ $(,)?) => {
        $(
            impl $trait for $ty {
                fn $get(&self) -> &$group {
                    &self.$($path).+
                }

                fn $get_mut(&mut self) -> &mut $group {
                    &mut self.$($path).+
                }
            }
        )+
    };
}

capability!(Signable, Signing, signing, signing_mut =>
    SignatureField: signing,
    InitialsField: signing,
    DateSignedField: signing,
    NoteField: signing,
    TextField: signing,
    CheckboxField: signing,
    CheckboxGroupField: checkbox.signing,
    RadioField: signing,
    DropdownField: text.signing,
    AttachmentField: signing,
);

capability!(Requireable, Requirement, requirement, requirement_mut =>
    SignatureField: requirement,
    InitialsField: requirement,
    NoteField: requirement,
    TextField: requirement,
    CheckboxField: requirement,
    CheckboxGroupField: checkbox.requirement,
    RadioField: requirement,
    DropdownField: text.requirement,
    AttachmentField: requirement,
);

capability!(Readable, ReadOnly, read_only_flag, read_only_flag_mut =>
    NoteField: read_only,
    TextField: read_only,
    CheckboxField: read_only,
    CheckboxGroupField: checkbox.read_only,
    RadioField: read_only,
    DropdownField: text.read_only,
);

capability!(Validable, Validation, validation, validation_mut =>
    TextField: validation,
    DropdownField: text.validation,
);

capability!(TextStyled, TextFormat, format, format_mut =>
    DateSignedField: format,
    NoteField: format,
    TextField: format,
    DropdownField: text.format,
);

// =============================================================================
// SUM TYPE
// =============================================================================

/// A form field of any kind, tagged with `type` on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum FormField {
    #[serde(rename = "signature")]
    Signature(SignatureField),
    #[serde(rename = "initials")]
    Initials(InitialsField),
    #[serde(rename = "date_signed")]
    DateSigned(DateSignedField),
    #[serde(rename = "note")]
    Note(NoteField),
    #[serde(rename = "text")]
    Text(TextField),
    #[serde(rename = "checkbox")]
    Checkbox(CheckboxField),
    #[serde(rename = "checkboxGroup")]
    CheckboxGroup(CheckboxGroupField),
    #[serde(rename = "radio")]
    Radio(RadioField),
    #[serde(rename = "dropdown")]
    Dropdown(DropdownField),
    #[serde(rename = "attachment")]
    Attachment(AttachmentField),
}

impl FormField {
    /// The base view of the field, whatever its kind.
    pub fn as_positioned(&self) -> &dyn Positioned {
        match self {
            FormField::Signature(f) => f,
            FormField::Initials(f) => f,
            FormField::DateSigned(f) => f,
            FormField::Note(f) => f,
            FormField::Text(f) => f,
            FormField::Checkbox(f) => f,
            FormField::CheckboxGroup(f) => f,
            FormField::Radio(f) => f,
            FormField::Dropdown(f) => f,
            FormField::Attachment(f) => f,
        }
    }

    pub fn as_positioned_mut(&mut self) -> &mut dyn Positioned {
        match self {
            FormField::Signature(f) => f,
            FormField::Initials(f) => f,
            FormField::DateSigned(f) => f,
            FormField::Note(f) => f,
            FormField::Text(f) => f,
            FormField::Checkbox(f) => f,
            FormField::CheckboxGroup(f) => f,
            FormField::Radio(f) => f,
            FormField::Dropdown(f) => f,
            FormField::Attachment(f) => f,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.as_positioned().kind()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.as_positioned().identifier()
    }

    pub fn file_index(&self) -> usize {
        self.as_positioned().file_index()
    }

    pub fn validate(&self) -> bool {
        self.as_positioned().validate()
    }

    /// Signer the field is assigned to, for kinds that have one.
    pub fn signer(&self) -> Option<&str> {
        match self {
            FormField::Signature(f) => f.signer(),
            FormField::Initials(f) => f.signer(),
            FormField::DateSigned(f) => f.signer(),
            FormField::Note(f) => f.signer(),
            FormField::Text(f) => f.signer(),
            FormField::Checkbox(f) => f.signer(),
            FormField::CheckboxGroup(f) => f.signer(),
            FormField::Radio(f) => f.signer(),
            FormField::Dropdown(f) => f.signer(),
            FormField::Attachment(f) => f.signer(),
        }
    }
}

macro_rules! into_form_field {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for FormField {
                fn from(field: $ty) -> Self {
                    FormField::$variant(field)
                }
            }
        )+
    };
}

into_form_field!(
    Signature(SignatureField),
    Initials(InitialsField),
    DateSigned(DateSignedField),
    Note(NoteField),
    Text(TextField),
    Checkbox(CheckboxField),
    CheckboxGroup(CheckboxGroupField),
    Radio(RadioField),
    Dropdown(DropdownField),
    Attachment(AttachmentField),
);
