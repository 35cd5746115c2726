use embedded_hal::i2c::I2c;
use register_access::RegisterAccess;

pub use crate::descriptors::*;

pub struct Ltc4162I2cInterface<I> {
    pub i2c: I,
    pub address: u8,
}

impl<I> Ltc4162I2cInterface<I> {
    pub const DEFAULT_DEVICE_ADDR: u8 = 0x77;

    pub const fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }
}

impl<I> RegisterAccess<u16> for Ltc4162I2cInterface<I>
where
    I: I2c,
{
    type Error = I::Error;

    fn read_block(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], buffer)?;

        log::trace!("Read {:02X?} from register 0x{:02X}", buffer, address);

        Ok(())
    }
}
