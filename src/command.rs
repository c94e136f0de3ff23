//! The subset of the ST7789 command set used to bring up the panel and write pixels.
//!
//! Note 1: Address windows are programmed as inclusive ranges of 16-bit column and row addresses.
//! After `MemoryWrite`, the controller consumes pixel words left to right then top to bottom
//! inside the window, and stays in that mode until the next command byte. It does not check how
//! many words it is given.

use crate::interface::DisplayInterface;

pub mod consts {
    //! Register addresses.

    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const WRCACE: u8 = 0x55;
    pub const PORCTRL: u8 = 0xB2;
    pub const GCTRL: u8 = 0xB7;
    pub const VCOMS: u8 = 0xBB;
    pub const LCMCTRL: u8 = 0xC0;
    pub const VDVVRHEN: u8 = 0xC2;
    pub const VRHS: u8 = 0xC3;
    pub const VDVS: u8 = 0xC4;
    pub const FRCTRL2: u8 = 0xC6;
    pub const PWCTRL1: u8 = 0xD0;
    pub const PVGAMCTRL: u8 = 0xE0;
    pub const NVGAMCTRL: u8 = 0xE1;

    /// Number of bytes in each gamma correction table.
    pub const GAMMA_TABLE_LEN: usize = 14;
}

use self::consts::*;

/// A command argument was outside the range the controller accepts. Nothing was sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError<E> {
    InvalidArgument,
    Interface(E),
}

/// Interface pixel format selected by `SetPixelFormat`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 16 bits per pixel, 5-6-5.
    Rgb565,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Enter sleep mode.
    SleepIn,
    /// Leave sleep mode. The panel needs time to stabilize afterwards.
    SleepOut,
    /// Control color inversion.
    SetInversion(bool),
    /// Control whether the frame memory is shown.
    SetDisplayOn(bool),
    /// Set the inclusive column range of the address window. (Note 1)
    ColumnAddressSet(u16, u16),
    /// Set the inclusive row range of the address window. (Note 1)
    RowAddressSet(u16, u16),
    /// Switch the controller into accepting pixel data for the current window.
    MemoryWrite,
    /// Set the memory data access control bits (scan direction, row/column exchange, color
    /// order) as a raw MADCTL value.
    MemoryAccessControl(u8),
    /// Set the interface pixel format.
    SetPixelFormat(PixelFormat),
    /// Set the porch setting: back porch, front porch (both 1-127), then the packed idle and
    /// partial mode porch bytes. Separate porch control is left disabled.
    PorchSetting(u8, u8, u8, u8),
    /// Set the gate VGH/VGL levels as a packed byte (two 3-bit fields).
    GateControl(u8),
    /// Set the VCOM voltage. Range is 0-63.
    VcomSetting(u8),
    /// Set the LCM control bits.
    LcmControl(u8),
    /// Select whether VDV and VRH come from the command registers.
    VdvVrhEnable(bool),
    /// Set VRH. Range is 0-39.
    VrhSet(u8),
    /// Set VDV. Range is 0-63.
    VdvSet(u8),
    /// Set the normal mode frame rate. Range is 0-31.
    FrameRateControl(u8),
    /// Set the AVDD/AVCL/VDS power byte of power control 1.
    PowerControl1(u8),
    /// Set content adaptive brightness control.
    ContentAdaptiveBrightness(u8),
    /// Write one byte to a register that the panel vendor's bring-up sequence programs but which
    /// the controller documentation does not name.
    VendorRegister(u8, u8),
}

pub enum BufCommand<'buf> {
    /// Set the positive voltage gamma table.
    PositiveGamma(&'buf [u8]),
    /// Set the negative voltage gamma table.
    NegativeGamma(&'buf [u8]),
}

macro_rules! ok_command {
    ($buf:ident, $cmd:expr,[]) => {
        Ok(($cmd, &$buf[..0]))
    };
    ($buf:ident, $cmd:expr,[$($arg:expr),+]) => {{
        let args = [$($arg),+];
        $buf[..args.len()].copy_from_slice(&args);
        Ok(($cmd, &$buf[..args.len()]))
    }};
}

impl Command {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), CommandError<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let mut arg_buf = [0u8; 5];
        let framed: Result<(u8, &[u8]), CommandError<DI::Error>> = match self {
            Command::SleepIn => ok_command!(arg_buf, SLPIN, []),
            Command::SleepOut => ok_command!(arg_buf, SLPOUT, []),
            Command::SetInversion(ena) => {
                ok_command!(arg_buf, if ena { INVON } else { INVOFF }, [])
            }
            Command::SetDisplayOn(ena) => {
                ok_command!(arg_buf, if ena { DISPON } else { DISPOFF }, [])
            }
            Command::ColumnAddressSet(start, end) => match (start, end) {
                (start, end) if start <= end => {
                    let [sh, sl] = start.to_be_bytes();
                    let [eh, el] = end.to_be_bytes();
                    ok_command!(arg_buf, CASET, [sh, sl, eh, el])
                }
                _ => Err(CommandError::InvalidArgument),
            },
            Command::RowAddressSet(start, end) => match (start, end) {
                (start, end) if start <= end => {
                    let [sh, sl] = start.to_be_bytes();
                    let [eh, el] = end.to_be_bytes();
                    ok_command!(arg_buf, RASET, [sh, sl, eh, el])
                }
                _ => Err(CommandError::InvalidArgument),
            },
            Command::MemoryWrite => ok_command!(arg_buf, RAMWR, []),
            Command::MemoryAccessControl(madctl) => ok_command!(arg_buf, MADCTL, [madctl]),
            Command::SetPixelFormat(format) => ok_command!(
                arg_buf,
                COLMOD,
                [match format {
                    PixelFormat::Rgb565 => 0x05,
                }]
            ),
            Command::PorchSetting(back, front, idle, partial) => match (back, front) {
                (1..=0x7F, 1..=0x7F) => {
                    ok_command!(arg_buf, PORCTRL, [back, front, 0x00, idle, partial])
                }
                _ => Err(CommandError::InvalidArgument),
            },
            Command::GateControl(levels) => match levels & 0x88 {
                0 => ok_command!(arg_buf, GCTRL, [levels]),
                _ => Err(CommandError::InvalidArgument),
            },
            Command::VcomSetting(vcom) => match vcom {
                0..=0x3F => ok_command!(arg_buf, VCOMS, [vcom]),
                _ => Err(CommandError::InvalidArgument),
            },
            Command::LcmControl(bits) => ok_command!(arg_buf, LCMCTRL, [bits]),
            Command::VdvVrhEnable(ena) => ok_command!(arg_buf, VDVVRHEN, [ena as u8]),
            Command::VrhSet(vrh) => match vrh {
                0..=0x27 => ok_command!(arg_buf, VRHS, [vrh]),
                _ => Err(CommandError::InvalidArgument),
            },
            Command::VdvSet(vdv) => match vdv {
                0..=0x3F => ok_command!(arg_buf, VDVS, [vdv]),
                _ => Err(CommandError::InvalidArgument),
            },
            Command::FrameRateControl(rate) => match rate {
                0..=0x1F => ok_command!(arg_buf, FRCTRL2, [rate]),
                _ => Err(CommandError::InvalidArgument),
            },
            Command::PowerControl1(power) => ok_command!(arg_buf, PWCTRL1, [0xA4, power]),
            Command::ContentAdaptiveBrightness(mode) => ok_command!(arg_buf, WRCACE, [mode]),
            Command::VendorRegister(reg, value) => ok_command!(arg_buf, reg, [value]),
        };
        let (cmd, data) = framed?;
        iface.send_command(cmd).map_err(CommandError::Interface)?;
        if data.is_empty() {
            Ok(())
        } else {
            iface.send_data(data).map_err(CommandError::Interface)
        }
    }
}

impl<'a> BufCommand<'a> {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), CommandError<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let framed: Result<(u8, &[u8]), CommandError<DI::Error>> = match self {
            BufCommand::PositiveGamma(table) if table.len() == GAMMA_TABLE_LEN => {
                Ok((PVGAMCTRL, table))
            }
            BufCommand::NegativeGamma(table) if table.len() == GAMMA_TABLE_LEN => {
                Ok((NVGAMCTRL, table))
            }
            BufCommand::PositiveGamma(_) | BufCommand::NegativeGamma(_) => {
                Err(CommandError::InvalidArgument)
            }
        };
        let (cmd, data) = framed?;
        iface.send_command(cmd).map_err(CommandError::Interface)?;
        if data.is_empty() {
            Ok(())
        } else {
            iface.send_data(data).map_err(CommandError::Interface)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::TestSpyInterface;

    #[test]
    fn column_address_set() {
        let mut di = TestSpyInterface::new();
        Command::ColumnAddressSet(23, 0x1EF).send(&mut di).unwrap();
        di.check(0x2A, &[0x00, 23, 0x01, 0xEF]);
        di.clear();
        Command::ColumnAddressSet(5, 5).send(&mut di).unwrap();
        di.check(0x2A, &[0, 5, 0, 5]);
        di.clear();
        assert_eq!(
            Command::ColumnAddressSet(42, 23).send(&mut di),
            Err(CommandError::InvalidArgument)
        );
        assert_eq!(di.transactions(), 0);
    }

    #[test]
    fn row_address_set() {
        let mut di = TestSpyInterface::new();
        Command::RowAddressSet(0x0100, 0x0101).send(&mut di).unwrap();
        di.check(0x2B, &[0x01, 0x00, 0x01, 0x01]);
        di.clear();
        assert_eq!(
            Command::RowAddressSet(1, 0).send(&mut di),
            Err(CommandError::InvalidArgument)
        );
    }

    #[test]
    fn memory_write_has_no_payload() {
        let mut di = TestSpyInterface::new();
        Command::MemoryWrite.send(&mut di).unwrap();
        di.check(0x2C, &[]);
    }

    #[test]
    fn sleep_and_display_control() {
        let mut di = TestSpyInterface::new();
        Command::SleepOut.send(&mut di).unwrap();
        di.check(0x11, &[]);
        di.clear();
        Command::SleepIn.send(&mut di).unwrap();
        di.check(0x10, &[]);
        di.clear();
        Command::SetDisplayOn(true).send(&mut di).unwrap();
        di.check(0x29, &[]);
        di.clear();
        Command::SetDisplayOn(false).send(&mut di).unwrap();
        di.check(0x28, &[]);
        di.clear();
        Command::SetInversion(true).send(&mut di).unwrap();
        di.check(0x21, &[]);
        di.clear();
        Command::SetInversion(false).send(&mut di).unwrap();
        di.check(0x20, &[]);
    }

    #[test]
    fn pixel_format() {
        let mut di = TestSpyInterface::new();
        Command::SetPixelFormat(PixelFormat::Rgb565)
            .send(&mut di)
            .unwrap();
        di.check(0x3A, &[0x05]);
    }

    #[test]
    fn porch_setting() {
        let mut di = TestSpyInterface::new();
        Command::PorchSetting(0x0C, 0x0C, 0x33, 0x33)
            .send(&mut di)
            .unwrap();
        di.check(0xB2, &[0x0C, 0x0C, 0x00, 0x33, 0x33]);
        assert_eq!(
            Command::PorchSetting(0, 0x0C, 0x33, 0x33).send(&mut di),
            Err(CommandError::InvalidArgument)
        );
        assert_eq!(
            Command::PorchSetting(0x0C, 0x80, 0x33, 0x33).send(&mut di),
            Err(CommandError::InvalidArgument)
        );
    }

    #[test]
    fn power_settings() {
        let mut di = TestSpyInterface::new();
        Command::GateControl(0x35).send(&mut di).unwrap();
        di.check(0xB7, &[0x35]);
        assert_eq!(
            Command::GateControl(0x80).send(&mut di),
            Err(CommandError::InvalidArgument)
        );
        di.clear();
        Command::VcomSetting(0x35).send(&mut di).unwrap();
        di.check(0xBB, &[0x35]);
        assert_eq!(
            Command::VcomSetting(0x40).send(&mut di),
            Err(CommandError::InvalidArgument)
        );
        di.clear();
        Command::VdvVrhEnable(true).send(&mut di).unwrap();
        di.check(0xC2, &[0x01]);
        di.clear();
        Command::VrhSet(0x13).send(&mut di).unwrap();
        di.check(0xC3, &[0x13]);
        assert_eq!(Command::VrhSet(0x28).send(&mut di), Err(CommandError::InvalidArgument));
        di.clear();
        Command::VdvSet(0x20).send(&mut di).unwrap();
        di.check(0xC4, &[0x20]);
        di.clear();
        Command::FrameRateControl(0x0F).send(&mut di).unwrap();
        di.check(0xC6, &[0x0F]);
        assert_eq!(
            Command::FrameRateControl(0x20).send(&mut di),
            Err(CommandError::InvalidArgument)
        );
        di.clear();
        Command::PowerControl1(0xA1).send(&mut di).unwrap();
        di.check(0xD0, &[0xA4, 0xA1]);
    }

    #[test]
    fn vendor_register() {
        let mut di = TestSpyInterface::new();
        Command::VendorRegister(0xCA, 0x0F).send(&mut di).unwrap();
        di.check(0xCA, &[0x0F]);
    }

    #[test]
    fn gamma_tables() {
        let table = [0xD0, 0x00, 0x06, 0x09, 0x0B, 0x2A, 0x3C, 0x55, 0x4B, 0x08, 0x16, 0x14, 0x19, 0x20];
        let mut di = TestSpyInterface::new();
        BufCommand::PositiveGamma(&table).send(&mut di).unwrap();
        di.check(0xE0, &table);
        di.clear();
        BufCommand::NegativeGamma(&table).send(&mut di).unwrap();
        di.check(0xE1, &table);
        di.clear();
        // Too few values
        assert_eq!(
            BufCommand::PositiveGamma(&table[..13]).send(&mut di),
            Err(CommandError::InvalidArgument)
        );
        assert_eq!(di.transactions(), 0);
    }

    #[test]
    fn interface_failure_propagates() {
        let mut di = TestSpyInterface::new();
        di.fail_after(0);
        assert!(matches!(
            Command::SleepOut.send(&mut di),
            Err(CommandError::Interface(_))
        ));
    }
}
