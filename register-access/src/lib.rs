#![no_std]

use device_descriptor::{ReadOnlyRegister, RegisterWidthType};

/// Largest register this crate can transfer in one read.
const MAX_REGISTER_BYTES: usize = 4;

pub trait RegisterReader<RWT>: Sized
where
    RWT: RegisterWidthType,
{
    fn read<E>(iface: &mut impl RegisterAccess<RWT, Error = E>) -> Result<Self, E>;
}

impl<T> RegisterReader<T::RegisterWidth> for T
where
    T: ReadOnlyRegister,
{
    fn read<E>(iface: &mut impl RegisterAccess<T::RegisterWidth, Error = E>) -> Result<Self, E> {
        iface.read_register()
    }
}

/// Blocking, read-only access to the registers of a device.
///
/// Implementors only provide the block transfer; everything else is built on top of it.
pub trait RegisterAccess<RWT>
where
    RWT: RegisterWidthType,
{
    type Error;

    /// Reads `buffer.len()` bytes starting at register `address`.
    fn read_block(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Reads a single register as a raw little-endian value.
    fn read_raw(&mut self, address: u8) -> Result<RWT, Self::Error> {
        let mut buffer = [0; MAX_REGISTER_BYTES];
        let bytes = &mut buffer[..RWT::BYTES];

        self.read_block(address, bytes)?;

        Ok(RWT::from_le_bytes(bytes))
    }

    fn read_register<R>(&mut self) -> Result<R, Self::Error>
    where
        R: ReadOnlyRegister<RegisterWidth = RWT>,
    {
        self.read_raw(R::ADDRESS).map(R::from_bits)
    }
}
