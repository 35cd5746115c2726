#![cfg_attr(not(test), no_std)]

//! Declarative register descriptions.
//!
//! The [`device!`] macro turns a datasheet-like register listing into typed register values,
//! field enums with labels, and a static table of [`RegisterDescriptor`]s that can be searched
//! by name and used to decompose raw register values without any per-register code.

use core::{convert::TryFrom, fmt, marker::PhantomData};

use byteorder::{ByteOrder, LittleEndian};

/// Label reported for values that have no entry in their enum table.
pub const UNRECOGNIZED: &str = "None";

pub trait RegisterWidthType: Copy {
    const WIDTH: u8;
    const BYTES: usize = Self::WIDTH as usize / 8;

    fn from_32(data: u32) -> Self;
    fn to_32(self) -> u32;

    /// Decodes a register value as transferred on the bus (least significant byte first).
    fn from_le_bytes(bytes: &[u8]) -> Self;
}

impl RegisterWidthType for u8 {
    const WIDTH: u8 = 8;

    fn from_32(data: u32) -> Self {
        debug_assert!(data <= u8::MAX as u32);
        data as u8
    }

    fn to_32(self) -> u32 {
        self as u32
    }

    fn from_le_bytes(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl RegisterWidthType for u16 {
    const WIDTH: u8 = 16;

    fn from_32(data: u32) -> Self {
        debug_assert!(data <= u16::MAX as u32);
        data as u16
    }

    fn to_32(self) -> u32 {
        self as u32
    }

    fn from_le_bytes(bytes: &[u8]) -> Self {
        LittleEndian::read_u16(bytes)
    }
}

pub trait ReadOnlyRegister: Copy {
    type RegisterWidth: RegisterWidthType;

    const ADDRESS: u8;
    const NAME: &'static str;
    const DESCRIPTOR: RegisterDescriptor;

    fn from_bits(bits: Self::RegisterWidth) -> Self;
    fn bits(&self) -> Self::RegisterWidth;
}

/// Types that can be stored in a register field.
pub trait FieldType {
    /// Labels for the values of this type, if it has any.
    const TABLE: Option<&'static EnumTable>;
}

impl FieldType for u8 {
    const TABLE: Option<&'static EnumTable> = None;
}

impl FieldType for u16 {
    const TABLE: Option<&'static EnumTable> = None;
}

pub struct Field<const POS: u8, const WIDTH: u8, DataType, Reg, RWT> {
    _marker: PhantomData<(DataType, RWT)>,
    reg: Reg,
}

impl<const POS: u8, const WIDTH: u8, DataType, Reg, RWT> Field<POS, WIDTH, DataType, Reg, RWT>
where
    DataType: TryFrom<RWT>,
    Reg: ReadOnlyRegister<RegisterWidth = RWT>,
    RWT: RegisterWidthType,
{
    const _CONST_CHECK: () = assert!(POS + WIDTH <= RWT::WIDTH);

    pub const fn new(reg: Reg) -> Self {
        Field {
            _marker: PhantomData,
            reg,
        }
    }

    #[inline(always)]
    pub fn read_field_bits(&self) -> RWT {
        RWT::from_32(extract(self.reg.bits().to_32(), POS, WIDTH))
    }

    /// Returns the typed field value, or `None` if the raw bits don't map to a known value.
    #[inline(always)]
    pub fn read(&self) -> Option<DataType> {
        DataType::try_from(self.read_field_bits()).ok()
    }
}

#[inline(always)]
fn extract(raw: u32, pos: u8, width: u8) -> u32 {
    let mask = if width >= 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    };

    (raw >> pos as u32) & mask
}

/// Value to label mapping of an enumerated field.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumTable {
    pub name: &'static str,
    pub entries: &'static [(u32, &'static str)],
}

impl EnumTable {
    /// Returns the label of an exact match.
    pub fn lookup(&self, value: u32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == value)
            .map(|(_, label)| *label)
    }

    /// Returns the label of an exact match, or [`UNRECOGNIZED`].
    pub fn label(&self, value: u32) -> &'static str {
        self.lookup(value).unwrap_or(UNRECOGNIZED)
    }

    /// Returns the labels of every non-zero entry whose bits are all set in `value`.
    ///
    /// Meant for one-hot tables, where each entry names a single status bit.
    pub fn flags(&self, value: u32) -> impl Iterator<Item = &'static str> {
        let entries = self.entries;

        entries
            .iter()
            .filter(move |(bits, _)| *bits != 0 && value & *bits == *bits)
            .map(|(_, label)| *label)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub doc: &'static [&'static str],
    pub pos: u8,
    pub width: u8,
    pub table: Option<&'static EnumTable>,
}

impl FieldDescriptor {
    pub fn extract(&self, raw: u32) -> u32 {
        extract(raw, self.pos, self.width)
    }

    pub fn read(&self, raw: u32) -> FieldValue {
        let value = self.extract(raw);

        FieldValue {
            name: self.name,
            value,
            label: self.table.map(|table| match table.lookup(value) {
                Some(label) => FieldLabel::Known(label),
                None => FieldLabel::Unrecognized,
            }),
        }
    }

    /// Returns the first doc line, or the field name if the field is undocumented.
    pub fn summary(&self) -> &'static str {
        let doc = self.doc;

        doc.first().copied().map(str::trim).unwrap_or(self.name)
    }

    pub fn is_flag(&self) -> bool {
        self.width == 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldLabel {
    Known(&'static str),
    Unrecognized,
}

impl FieldLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldLabel::Known(label) => label,
            FieldLabel::Unrecognized => UNRECOGNIZED,
        }
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decomposed field of a raw register value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldValue {
    pub name: &'static str,
    pub value: u32,
    /// `None` if the field is a plain number without an enum table.
    pub label: Option<FieldLabel>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RegisterDescriptor {
    pub name: &'static str,
    pub address: u8,
    pub fields: &'static [FieldDescriptor],
}

impl RegisterDescriptor {
    /// Splits a raw register value into its documented fields.
    pub fn decompose(&self, raw: u32) -> Fields {
        let fields = self.fields;

        Fields {
            fields: fields.iter(),
            raw,
        }
    }

    /// Returns the single-bit fields that are set in `raw`.
    pub fn set_flags(&self, raw: u32) -> impl Iterator<Item = &'static FieldDescriptor> {
        let fields = self.fields;

        fields
            .iter()
            .filter(move |field| field.is_flag() && field.extract(raw) != 0)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        let fields = self.fields;

        fields.iter().find(|field| field.name == name)
    }
}

pub struct Fields {
    fields: core::slice::Iter<'static, FieldDescriptor>,
    raw: u32,
}

impl Iterator for Fields {
    type Item = FieldValue;

    fn next(&mut self) -> Option<Self::Item> {
        self.fields.next().map(|field| field.read(self.raw))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fields.size_hint()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownRegister;

impl fmt::Display for UnknownRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown register")
    }
}

impl core::error::Error for UnknownRegister {}

/// Finds a register by its datasheet mnemonic.
pub fn find_register(
    registers: &'static [RegisterDescriptor],
    name: &str,
) -> Result<&'static RegisterDescriptor, UnknownRegister> {
    registers
        .iter()
        .find(|reg| reg.name == name)
        .ok_or(UnknownRegister)
}

/// Finds a register by its address.
pub fn register_at(
    registers: &'static [RegisterDescriptor],
    address: u8,
) -> Option<&'static RegisterDescriptor> {
    registers.iter().find(|reg| reg.address == address)
}

#[doc(hidden)]
#[macro_export]
macro_rules! field_width {
    ($pos:literal) => {
        1
    };
    ($pos:literal, $end:literal) => {
        $end - $pos
    };
}

#[macro_export]
macro_rules! field_enum {
    ($type:ident($rwt:ident) {
        $( $variant:ident = $value:literal => $label:literal ),+ $(,)?
    }) => {
        #[derive(Debug, PartialEq, Eq, Copy, Clone)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $type {
            $($variant = $value),+
        }

        impl $type {
            pub const TABLE: &'static $crate::EnumTable = &$crate::EnumTable {
                name: stringify!($type),
                entries: &[$(($value, $label)),+],
            };

            pub fn label(self) -> &'static str {
                match self {
                    $($type::$variant => $label),+
                }
            }
        }

        impl $crate::FieldType for $type {
            const TABLE: Option<&'static $crate::EnumTable> = Some($type::TABLE);
        }

        impl core::convert::TryFrom<$rwt> for $type {
            type Error = $rwt;

            fn try_from(data: $rwt) -> Result<Self, Self::Error> {
                match data {
                    $($value => Ok($type::$variant),)+
                    _ => Err(data),
                }
            }
        }

        impl From<$type> for $rwt {
            fn from(data: $type) -> $rwt {
                data as $rwt
            }
        }
    };
}

field_enum! {
    Flag(u16) {
        Clear = 0 => "clear",
        Set = 1 => "set"
    }
}

#[macro_export]
macro_rules! register {
    (
        $(#[doc = $rdoc:literal])*
        $reg:ident($rwt:ident @ $addr:literal as $mnemonic:ident) {
            $(
                $(#[doc = $fdoc:literal])*
                $field:ident @ $pos:literal $(.. $end:literal)? => $type:ident $({
                    $( $variant:ident = $value:literal => $label:literal ),+ $(,)?
                })?
            ),* $(,)?
        }
    ) => {
        $( $(
            $crate::field_enum!($type($rwt) { $($variant = $value => $label),+ });
        )? )*

        #[doc = concat!("Address of `", stringify!($mnemonic), "`.")]
        pub const $mnemonic: u8 = $addr;

        $(#[doc = $rdoc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[must_use]
        pub struct $reg {
            value: $rwt,
        }

        impl $crate::ReadOnlyRegister for $reg {
            type RegisterWidth = $rwt;

            const ADDRESS: u8 = $addr;
            const NAME: &'static str = stringify!($mnemonic);
            const DESCRIPTOR: $crate::RegisterDescriptor = $crate::RegisterDescriptor {
                name: stringify!($mnemonic),
                address: $addr,
                fields: &[$(
                    $crate::FieldDescriptor {
                        name: stringify!($field),
                        doc: &[$($fdoc),*],
                        pos: $pos,
                        width: $crate::field_width!($pos $(, $end)?),
                        table: <$type as $crate::FieldType>::TABLE,
                    }
                ),*],
            };

            #[inline(always)]
            fn from_bits(bits: $rwt) -> Self {
                Self { value: bits }
            }

            #[inline(always)]
            fn bits(&self) -> $rwt {
                self.value
            }
        }

        impl $reg {
            /// Splits the register value into its documented fields.
            pub fn fields(&self) -> $crate::Fields {
                <Self as $crate::ReadOnlyRegister>::DESCRIPTOR.decompose(self.value as u32)
            }

            $(
                $(#[doc = $fdoc])*
                #[inline(always)]
                pub fn $field(self) -> $crate::Field<
                    { $pos },
                    { $crate::field_width!($pos $(, $end)?) },
                    $type,
                    Self,
                    $rwt,
                > {
                    $crate::Field::new(self)
                }
            )*
        }
    };
}

/// Describes every register of a device.
///
/// Besides the per-register items generated by [`register!`], this emits a `REGISTERS` table in
/// declaration order and an `address_of` lookup over it.
#[macro_export]
macro_rules! device {
    (
        $(
            $(#[doc = $rdoc:literal])*
            $reg:ident($rwt:ident @ $addr:literal as $mnemonic:ident) {
                $($fields:tt)*
            }
        )+
    ) => {
        $(
            $crate::register! {
                $(#[doc = $rdoc])*
                $reg($rwt @ $addr as $mnemonic) {
                    $($fields)*
                }
            }
        )+

        /// Every documented register, in declaration order.
        pub static REGISTERS: &[$crate::RegisterDescriptor] = &[
            $(<$reg as $crate::ReadOnlyRegister>::DESCRIPTOR),+
        ];

        /// Returns the address of the register with the given datasheet mnemonic.
        pub fn address_of(name: &str) -> Result<u8, $crate::UnknownRegister> {
            $crate::find_register(REGISTERS, name).map(|reg| reg.address)
        }
    };
}

#[cfg(test)]
mod test {
    use crate::{FieldLabel, ReadOnlyRegister, UnknownRegister};

    mod regs {
        use crate::Flag;

        crate::device! {
            /// Two enum fields sharing a register.
            Mode(u16 @ 0x10 as MODE_REG) {
                /// Operating mode
                mode @ 8..12 => OpMode {
                    Idle = 0 => "Idle",
                    Run = 3 => "Running"
                },
                count @ 0..4 => u16
            }
            Status(u16 @ 0x11 as STATUS_REG) {
                /// Ready to go
                ready @ 0 => Flag,
                busy @ 3 => Flag,
                phase @ 4..8 => Phase {
                    Warmup = 1 => "Warmup",
                    Steady = 2 => "Steady",
                    Cooldown = 4 => "Cooldown"
                }
            }
            Plain(u16 @ 0x12 as PLAIN_REG) {}
        }
    }

    use regs::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(address_of("MODE_REG"), Ok(0x10));
        assert_eq!(address_of("PLAIN_REG"), Ok(0x12));
        assert_eq!(address_of("MODE"), Err(UnknownRegister));
        assert_eq!(MODE_REG, 0x10);
        assert_eq!(Status::NAME, "STATUS_REG");
        assert_eq!(REGISTERS.len(), 3);
    }

    #[test]
    fn typed_fields() {
        let reg = Mode::from_bits(0x0305);

        assert_eq!(reg.mode().read(), Some(OpMode::Run));
        assert_eq!(reg.mode().read().map(OpMode::label), Some("Running"));
        assert_eq!(reg.count().read(), Some(5));

        let reg = Mode::from_bits(0x0700);
        assert_eq!(reg.mode().read_field_bits(), 7);
        assert_eq!(reg.mode().read(), None);
    }

    #[test]
    fn decompose() {
        let fields: Vec<_> = Mode::from_bits(0x0305).fields().collect();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "mode");
        assert_eq!(fields[0].value, 3);
        assert_eq!(fields[0].label, Some(FieldLabel::Known("Running")));
        assert_eq!(fields[1].name, "count");
        assert_eq!(fields[1].value, 5);
        assert_eq!(fields[1].label, None);

        let fields: Vec<_> = Mode::DESCRIPTOR.decompose(0x0900).collect();
        assert_eq!(fields[0].label, Some(FieldLabel::Unrecognized));
        assert_eq!(fields[0].label.unwrap().as_str(), "None");
    }

    #[test]
    fn field_docs() {
        let mode = Mode::DESCRIPTOR.field("mode").unwrap();
        assert_eq!(mode.summary(), "Operating mode");
        assert_eq!((mode.pos, mode.width), (8, 4));

        let count = Mode::DESCRIPTOR.field("count").unwrap();
        assert_eq!(count.summary(), "count");
    }

    #[test]
    fn flags() {
        let set: Vec<_> = Status::DESCRIPTOR
            .set_flags(0x0009)
            .map(|field| field.name)
            .collect();
        assert_eq!(set, ["ready", "busy"]);

        assert_eq!(Status::DESCRIPTOR.set_flags(0).count(), 0);
        assert_eq!(Status::DESCRIPTOR.set_flags(0x00F0).count(), 0);
    }

    #[test]
    fn enum_table() {
        let table = Phase::TABLE;

        assert_eq!(table.lookup(2), Some("Steady"));
        assert_eq!(table.label(2), "Steady");
        assert_eq!(table.label(3), "None");
        assert_eq!(table.label(0), "None");

        let set: Vec<_> = table.flags(3).collect();
        assert_eq!(set, ["Warmup", "Steady"]);
        assert_eq!(table.flags(0).count(), 0);
    }
}
