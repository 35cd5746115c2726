use anyhow::{Context, Result as AnyResult};
use clap::{ArgAction, Args, Parser, Subcommand};
use device_descriptor::{
    find_register, FieldDescriptor, Flag, ReadOnlyRegister, RegisterDescriptor,
};
use linux_embedded_hal::I2cdev;
use log::LevelFilter;
use ltc4162::{ll, Channel, Ltc4162, ScalingConstants};

#[derive(Debug, Subcommand)]
pub enum Subcommands {
    /// Reads and decodes the charger status and every telemetry channel.
    Report,

    /// Reads a single register and splits it into its fields.
    Read {
        /// Register mnemonic, like `VBAT_REG`.
        name: String,
    },

    /// Splits a raw register value into its fields without touching the bus.
    Decode {
        /// Register mnemonic, like `CHEM_CELLS_REG`.
        name: String,

        /// Raw value, decimal or 0x prefixed hexadecimal.
        #[clap(value_parser = parse_raw)]
        raw: u16,
    },

    /// Lists the register map.
    Registers,
}

/// Board dependent scaling constants.
#[derive(Debug, Clone, Copy, Args)]
pub struct Constants {
    /// Input current sense resistor, Ω.
    #[clap(long, default_value_t = ScalingConstants::default().rsnsi)]
    rsnsi: f32,

    /// Battery current sense resistor, Ω.
    #[clap(long, default_value_t = ScalingConstants::default().rsnsb)]
    rsnsb: f32,

    /// Thermistor bias resistor, Ω.
    #[clap(long, default_value_t = ScalingConstants::default().rntcbias)]
    rntcbias: f32,

    /// Resistance in series with the thermistor, Ω.
    #[clap(long, default_value_t = ScalingConstants::default().rntcser)]
    rntcser: f32,

    #[clap(long, default_value_t = ScalingConstants::default().vindiv)]
    vindiv: f32,

    #[clap(long, default_value_t = ScalingConstants::default().voutdiv)]
    voutdiv: f32,

    #[clap(long, default_value_t = ScalingConstants::default().batdiv)]
    batdiv: f32,

    #[clap(long, default_value_t = ScalingConstants::default().avprog)]
    avprog: f32,

    #[clap(long, default_value_t = ScalingConstants::default().avclprog)]
    avclprog: f32,

    /// ADC codes per volt.
    #[clap(long, default_value_t = ScalingConstants::default().adcgain)]
    adcgain: f32,
}

impl From<Constants> for ScalingConstants {
    fn from(c: Constants) -> Self {
        Self {
            rsnsi: c.rsnsi,
            rsnsb: c.rsnsb,
            rntcbias: c.rntcbias,
            rntcser: c.rntcser,
            vindiv: c.vindiv,
            voutdiv: c.voutdiv,
            batdiv: c.batdiv,
            avprog: c.avprog,
            avclprog: c.avclprog,
            adcgain: c.adcgain,
            ..Default::default()
        }
    }
}

#[derive(Debug, Parser)]
#[clap(about, version, propagate_version = true)]
pub struct Cli {
    /// I²C bus number, opened as /dev/i2c-N.
    #[clap(long, default_value_t = 1)]
    pub bus: u8,

    /// 7-bit device address, decimal or 0x prefixed hexadecimal.
    #[clap(long, default_value = "0x77", value_parser = parse_address)]
    pub address: u8,

    #[clap(flatten)]
    pub constants: Constants,

    /// More output. Repeat for more detail. `RUST_LOG` takes precedence.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub subcommand: Option<Subcommands>,
}

fn parse_number(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => input.parse(),
    };

    parsed.map_err(|e| format!("`{input}` is not a number: {e}"))
}

fn parse_address(input: &str) -> Result<u8, String> {
    let address = parse_number(input)?;

    match u8::try_from(address) {
        Ok(address) if address <= 0x7F => Ok(address),
        _ => Err(format!("`{input}` is not a 7-bit address")),
    }
}

fn parse_raw(input: &str) -> Result<u16, String> {
    let raw = parse_number(input)?;

    u16::try_from(raw).map_err(|_| format!("`{input}` does not fit in 16 bits"))
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn open(cli: &Cli) -> AnyResult<Ltc4162<I2cdev>> {
    let path = format!("/dev/i2c-{}", cli.bus);
    let i2c = I2cdev::new(&path).with_context(|| format!("I²C bus unavailable: {path}"))?;

    log::info!("Opened {path}, device address 0x{:02X}", cli.address);

    Ok(Ltc4162::with_address(i2c, cli.address, cli.constants.into()))
}

fn bit_range(field: &FieldDescriptor) -> String {
    if field.is_flag() {
        format!("[{}]", field.pos)
    } else {
        format!("[{}:{}]", field.pos + field.width - 1, field.pos)
    }
}

fn print_fields(reg: &RegisterDescriptor, raw: u16) {
    println!("{} (0x{:02X}) = 0x{:04X}", reg.name, reg.address, raw);

    for (field, value) in reg.fields.iter().zip(reg.decompose(raw as u32)) {
        let bits = bit_range(field);
        match value.label {
            Some(label) => println!(
                "  {bits:<8} {:<40} {} ({label})",
                field.summary(),
                value.value
            ),
            None => println!("  {bits:<8} {:<40} {}", field.summary(), value.value),
        }
    }
}

fn report(charger: &mut Ltc4162<I2cdev>) -> AnyResult<()> {
    let snapshot = charger
        .read_snapshot()
        .context("Failed to read the charger")?;

    let chem_cells = snapshot.chem_cells;
    println!(
        "Chemistry:        {} ({})",
        chem_cells.chemistry_label(),
        chem_cells.chem
    );
    println!(
        "Cell count:       {} ({})",
        chem_cells.cell_count_label(),
        chem_cells.cell_count
    );

    let state = snapshot.charger_state.bits();
    println!(
        "Charger state:    {} (0x{:04X})",
        snapshot.charger_state_label(),
        state
    );

    let status = snapshot.charge_status.bits();
    println!(
        "Charge status:    {} (0x{:04X})",
        snapshot.charge_status_label(),
        status
    );
    for label in ll::ChargeStatusCode::TABLE.flags(status as u32) {
        println!("  {label}");
    }

    let system = snapshot.system_status.bits();
    println!("System status:    0x{:04X}", system);
    for field in ll::SystemStatus::DESCRIPTOR.set_flags(system as u32) {
        println!("  {}", field.summary());
    }

    if snapshot.telemetry_status.telemetry_valid().read() != Some(Flag::Set) {
        log::warn!("Telemetry is not valid yet, readings may be stale");
    }

    let cell_count = chem_cells.cell_count;
    let channels = [
        ("VBAT", Channel::BatteryVoltage { cell_count }, snapshot.vbat),
        ("VIN", Channel::InputVoltage, snapshot.vin),
        ("VOUT", Channel::OutputVoltage, snapshot.vout),
        ("IBAT", Channel::BatteryCurrent, snapshot.ibat),
        ("IIN", Channel::InputCurrent, snapshot.iin),
        ("Die temperature", Channel::DieTemperature, snapshot.die_temp),
        ("BSR", Channel::BatteryResistance, snapshot.bsr),
    ];
    for (name, channel, value) in channels {
        println!("{:<17} {} {}", format!("{name}:"), value, channel.unit().symbol());
    }

    match snapshot.thermistor_temp {
        Some(temp) => println!("{:<17} {} °C", "Thermistor:", temp),
        None => println!("{:<17} no reading (open or out of range)", "Thermistor:"),
    }

    Ok(())
}

fn main() -> AnyResult<()> {
    let cli = Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_level(log_level(cli.verbose))
        .env()
        .init()?;

    match &cli.subcommand {
        None | Some(Subcommands::Report) => report(&mut open(&cli)?),
        Some(Subcommands::Read { name }) => {
            let mut charger = open(&cli)?;
            let (reg, raw) = charger
                .read_named(name)
                .with_context(|| format!("Failed to read {name}"))?;

            print_fields(reg, raw);
            Ok(())
        }
        Some(Subcommands::Decode { name, raw }) => {
            let reg = find_register(ll::REGISTERS, name)
                .with_context(|| format!("No register named {name}"))?;

            print_fields(reg, *raw);
            Ok(())
        }
        Some(Subcommands::Registers) => {
            for reg in ll::REGISTERS {
                println!("0x{:02X}  {}", reg.address, reg.name);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["ltc4162-monitor"]);

        assert_eq!(cli.bus, 1);
        assert_eq!(cli.address, 0x77);
        assert!(cli.subcommand.is_none());
        assert_eq!(
            ScalingConstants::from(cli.constants),
            ScalingConstants::default()
        );
    }

    #[test]
    fn overrides() {
        let cli = Cli::parse_from([
            "ltc4162-monitor",
            "--bus",
            "3",
            "--address",
            "0x68",
            "--rsnsb",
            "0.005",
            "-vv",
            "decode",
            "CHEM_CELLS_REG",
            "0x0210",
        ]);

        assert_eq!(cli.bus, 3);
        assert_eq!(cli.address, 0x68);
        assert_eq!(cli.constants.rsnsb, 0.005);
        assert_eq!(log_level(cli.verbose), LevelFilter::Debug);
        assert!(matches!(
            cli.subcommand,
            Some(Subcommands::Decode { ref name, raw: 0x0210 }) if name == "CHEM_CELLS_REG"
        ));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_address("0x77"), Ok(0x77));
        assert_eq!(parse_address("0X68"), Ok(0x68));
        assert_eq!(parse_address("104"), Ok(0x68));
        assert!(parse_address("0x80").is_err());
        assert!(parse_address("0x1FF").is_err());
        assert!(parse_address("seventy").is_err());

        assert_eq!(parse_raw("4096"), Ok(4096));
        assert_eq!(parse_raw("0xFFFF"), Ok(0xFFFF));
        assert!(parse_raw("0x10000").is_err());
    }

    #[test]
    fn bit_ranges() {
        let chem = ll::ChemCells::DESCRIPTOR.field("chem").unwrap();
        assert_eq!(bit_range(chem), "[11:8]");

        let en_chg = ll::SystemStatus::DESCRIPTOR.field("en_chg").unwrap();
        assert_eq!(bit_range(en_chg), "[8]");
    }
}
