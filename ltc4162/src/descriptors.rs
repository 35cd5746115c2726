use device_descriptor::Flag;

device_descriptor::device! {
    VBatLoAlertLimit(u16 @ 0x01 as VBAT_LO_ALERT_LIMIT_REG) {
        vbat_lo_alert_limit @ 0..16 => u16
    }
    VBatHiAlertLimit(u16 @ 0x02 as VBAT_HI_ALERT_LIMIT_REG) {
        vbat_hi_alert_limit @ 0..16 => u16
    }
    VInLoAlertLimit(u16 @ 0x03 as VIN_LO_ALERT_LIMIT_REG) {
        vin_lo_alert_limit @ 0..16 => u16
    }
    VInHiAlertLimit(u16 @ 0x04 as VIN_HI_ALERT_LIMIT_REG) {
        vin_hi_alert_limit @ 0..16 => u16
    }
    VOutLoAlertLimit(u16 @ 0x05 as VOUT_LO_ALERT_LIMIT_REG) {
        vout_lo_alert_limit @ 0..16 => u16
    }
    VOutHiAlertLimit(u16 @ 0x06 as VOUT_HI_ALERT_LIMIT_REG) {
        vout_hi_alert_limit @ 0..16 => u16
    }
    IInHiAlertLimit(u16 @ 0x07 as IIN_HI_ALERT_LIMIT_REG) {
        iin_hi_alert_limit @ 0..16 => u16
    }
    IBatLoAlertLimit(u16 @ 0x08 as IBAT_LO_ALERT_LIMIT_REG) {
        ibat_lo_alert_limit @ 0..16 => u16
    }
    DieTempHiAlertLimit(u16 @ 0x09 as DIE_TEMP_HI_ALERT_LIMIT_REG) {
        die_temp_hi_alert_limit @ 0..16 => u16
    }
    BsrHiAlertLimit(u16 @ 0x0A as BSR_HI_ALERT_LIMIT_REG) {
        bsr_hi_alert_limit @ 0..16 => u16
    }
    ThermistorVoltageHiAlertLimit(u16 @ 0x0B as THERMISTOR_VOLTAGE_HI_ALERT_LIMIT_REG) {
        thermistor_voltage_hi_alert_limit @ 0..16 => u16
    }
    ThermistorVoltageLoAlertLimit(u16 @ 0x0C as THERMISTOR_VOLTAGE_LO_ALERT_LIMIT_REG) {
        thermistor_voltage_lo_alert_limit @ 0..16 => u16
    }

    /// Interrupt requests for the limit alerts. Each bit enables the SMBALERT of the matching
    /// bit in `LIMIT_ALERTS_REG`.
    EnLimitAlerts(u16 @ 0x0D as EN_LIMIT_ALERTS_REG) {
        /// Telemetry valid alert enabled
        en_telemetry_valid_alert @ 15 => Flag,
        /// Battery series resistance measurement done alert enabled
        en_bsr_done_alert @ 14 => Flag,
        /// VBAT low alert enabled
        en_vbat_lo_alert @ 11 => Flag,
        /// VBAT high alert enabled
        en_vbat_hi_alert @ 10 => Flag,
        /// VIN low alert enabled
        en_vin_lo_alert @ 9 => Flag,
        /// VIN high alert enabled
        en_vin_hi_alert @ 8 => Flag,
        /// VOUT low alert enabled
        en_vout_lo_alert @ 7 => Flag,
        /// VOUT high alert enabled
        en_vout_hi_alert @ 6 => Flag,
        /// IIN high alert enabled
        en_iin_hi_alert @ 5 => Flag,
        /// IBAT low alert enabled
        en_ibat_lo_alert @ 4 => Flag,
        /// Die temperature high alert enabled
        en_die_temp_hi_alert @ 3 => Flag,
        /// BSR high alert enabled
        en_bsr_hi_alert @ 2 => Flag,
        /// Thermistor voltage high alert enabled
        en_thermistor_voltage_hi_alert @ 1 => Flag,
        /// Thermistor voltage low alert enabled
        en_thermistor_voltage_lo_alert @ 0 => Flag
    }
    EnChargerStateAlerts(u16 @ 0x0E as EN_CHARGER_STATE_ALERTS_REG) {
        /// Battery detection failed alert enabled
        en_bat_detect_failed_fault_alert @ 12 => Flag,
        /// Battery detection alert enabled
        en_battery_detection_alert @ 11 => Flag,
        /// Equalize charge alert enabled
        en_equalize_charge_alert @ 10 => Flag,
        /// Absorb charge alert enabled
        en_absorb_charge_alert @ 9 => Flag,
        /// Charger suspended alert enabled
        en_charger_suspended_alert @ 8 => Flag,
        /// CC/CV charge alert enabled
        en_cc_cv_charge_alert @ 6 => Flag,
        /// Battery missing alert enabled
        en_bat_missing_fault_alert @ 1 => Flag,
        /// Battery short alert enabled
        en_bat_short_fault_alert @ 0 => Flag
    }
    EnChargeStatusAlerts(u16 @ 0x0F as EN_CHARGE_STATUS_ALERTS_REG) {
        /// Current limit regulation alert enabled
        en_ilim_reg_active_alert @ 5 => Flag,
        /// Thermal regulation alert enabled
        en_thermal_reg_active_alert @ 4 => Flag,
        /// Input undervoltage regulation alert enabled
        en_vin_uvcl_active_alert @ 3 => Flag,
        /// Input current limit alert enabled
        en_iin_limit_active_alert @ 2 => Flag,
        /// Constant current alert enabled
        en_constant_current_alert @ 1 => Flag,
        /// Constant voltage alert enabled
        en_constant_voltage_alert @ 0 => Flag
    }

    /// Die temperature at which the charge current starts being throttled.
    ThermalRegStartTemp(u16 @ 0x10 as THERMAL_REG_START_TEMP_REG) {
        thermal_reg_start_temp @ 0..16 => u16
    }
    /// Die temperature at which the charge current is fully throttled.
    ThermalRegEndTemp(u16 @ 0x11 as THERMAL_REG_END_TEMP_REG) {
        thermal_reg_end_temp @ 0..16 => u16
    }
    ConfigBits(u16 @ 0x14 as CONFIG_BITS_REG) {
        /// Battery charging suspended
        suspend_charger @ 5 => Flag,
        /// Battery series resistance measurement requested
        run_bsr @ 4 => Flag,
        /// Telemetry forced to the high measurement rate
        telemetry_speed @ 3 => Flag,
        /// Telemetry kept on with battery power only
        force_telemetry_on @ 2 => Flag,
        /// Maximum power-point tracking enabled
        mppt_en @ 1 => Flag,
        /// Equalization phase requested
        equalize_req @ 0 => Flag
    }
    IInLimitTarget(u16 @ 0x15 as IIN_LIMIT_TARGET_REG) {
        iin_limit_target @ 0..6 => u16
    }
    InputUndervoltageSetting(u16 @ 0x16 as INPUT_UNDERVOLTAGE_SETTING_REG) {
        input_undervoltage_setting @ 0..8 => u16
    }
    ArmShipMode(u16 @ 0x19 as ARM_SHIP_MODE_REG) {
        arm_ship_mode @ 0..16 => u16
    }
    ChargeCurrentSetting(u16 @ 0x1A as CHARGE_CURRENT_SETTING_REG) {
        charge_current_setting @ 0..5 => u16
    }
    VChargeSetting(u16 @ 0x1B as VCHARGE_SETTING_REG) {
        vcharge_setting @ 0..6 => u16
    }
    COverXThreshold(u16 @ 0x1C as C_OVER_X_THRESHOLD_REG) {
        c_over_x_threshold @ 0..16 => u16
    }
    ChargerConfigBits(u16 @ 0x29 as CHARGER_CONFIG_BITS_REG) {
        /// Lead-acid temperature compensation enabled
        en_sla_temp_comp @ 1 => Flag
    }
    VAbsorbDelta(u16 @ 0x2A as VABSORB_DELTA_REG) {
        vabsorb_delta @ 0..6 => u16
    }
    MaxAbsorbTime(u16 @ 0x2B as MAX_ABSORB_TIME_REG) {
        /// Seconds
        max_absorb_time @ 0..16 => u16
    }
    VEqualizeDelta(u16 @ 0x2C as V_EQUALIZE_DELTA_REG) {
        v_equalize_delta @ 0..6 => u16
    }
    MaxEqualizeTime(u16 @ 0x2D as EQUALIZE_TIME_REG) {
        /// Seconds
        max_equalize_time @ 0..16 => u16
    }
    TAbsorbTimer(u16 @ 0x32 as TABSORBTIMER_REG) {
        tabsorbtimer @ 0..16 => u16
    }
    TEqualizeTimer(u16 @ 0x33 as TEQUALIZETIMER_REG) {
        tequalizetimer @ 0..16 => u16
    }

    /// High level phase of the charge cycle. Exactly one bit is expected to be set.
    ChargerState(u16 @ 0x34 as CHARGER_STATE_REG) {
        charger_state @ 0..13 => ChargerStateCode {
            BatDetectFailedFault = 4096 => "Bat Detect Failed",
            BatteryDetection = 2048 => "Bat Detection",
            EqualizeCharge = 1024 => "Equalize",
            AbsorbCharge = 512 => "Absorb",
            ChargerSuspended = 256 => "Suspended",
            CcCvCharge = 64 => "CC/CV Charge",
            BatMissingFault = 2 => "Open Battery",
            BatShortFault = 1 => "Shorted Battery"
        }
    }

    /// The control loop that currently governs the switching regulator.
    ChargeStatus(u16 @ 0x35 as CHARGE_STATUS_REG) {
        charge_status @ 0..6 => ChargeStatusCode {
            IlimRegActive = 32 => "Dropout",
            ThermalRegActive = 16 => "Thermal Regulation",
            VinUvclActive = 8 => "Input Voltage",
            IinLimitActive = 4 => "Input Current",
            ConstantCurrent = 2 => "Constant Current",
            ConstantVoltage = 1 => "Constant Voltage"
        }
    }

    LimitAlerts(u16 @ 0x36 as LIMIT_ALERTS_REG) {
        /// Telemetry is valid
        telemetry_valid_alert @ 15 => Flag,
        /// Battery series resistance measurement finished
        bsr_done_alert @ 14 => Flag,
        /// VBAT below its low limit
        vbat_lo_alert @ 11 => Flag,
        /// VBAT above its high limit
        vbat_hi_alert @ 10 => Flag,
        /// VIN below its low limit
        vin_lo_alert @ 9 => Flag,
        /// VIN above its high limit
        vin_hi_alert @ 8 => Flag,
        /// VOUT below its low limit
        vout_lo_alert @ 7 => Flag,
        /// VOUT above its high limit
        vout_hi_alert @ 6 => Flag,
        /// IIN above its high limit
        iin_hi_alert @ 5 => Flag,
        /// IBAT below its low limit
        ibat_lo_alert @ 4 => Flag,
        /// Die temperature above its high limit
        die_temp_hi_alert @ 3 => Flag,
        /// BSR above its high limit
        bsr_hi_alert @ 2 => Flag,
        /// Thermistor voltage above its high limit (cold)
        thermistor_voltage_hi_alert @ 1 => Flag,
        /// Thermistor voltage below its low limit (hot)
        thermistor_voltage_lo_alert @ 0 => Flag
    }
    ChargerStateAlerts(u16 @ 0x37 as CHARGER_STATE_ALERTS_REG) {
        /// Battery detection failed
        bat_detect_failed_fault_alert @ 12 => Flag,
        /// Battery detection in progress
        battery_detection_alert @ 11 => Flag,
        /// Equalize phase entered
        equalization_charge_alert @ 10 => Flag,
        /// Absorb phase entered
        absorb_charge_alert @ 9 => Flag,
        /// Charger suspended
        charger_suspended_alert @ 8 => Flag,
        /// CC/CV phase entered
        cc_cv_charge_alert @ 6 => Flag,
        /// Battery missing
        bat_missing_fault_alert @ 1 => Flag,
        /// Battery shorted
        bat_short_fault_alert @ 0 => Flag
    }
    ChargeStatusAlerts(u16 @ 0x38 as CHARGE_STATUS_ALERTS_REG) {
        /// Current limit regulation active
        ilim_reg_active_alert @ 5 => Flag,
        /// Thermal regulation active
        thermal_reg_active_alert @ 4 => Flag,
        /// Input undervoltage regulation active
        vin_uvcl_active_alert @ 3 => Flag,
        /// Input current limit active
        iin_limit_active_alert @ 2 => Flag,
        /// Constant current regulation active
        constant_current_alert @ 1 => Flag,
        /// Constant voltage regulation active
        constant_voltage_alert @ 0 => Flag
    }

    SystemStatus(u16 @ 0x39 as SYSTEM_STATUS_REG) {
        /// Battery charger is active
        en_chg @ 8 => Flag,
        /// Cell count pins are programmed for an unsupported battery voltage
        ///
        /// Always set when telemetry is not enabled.
        cell_count_err @ 7 => Flag,
        /// No frequency setting resistor detected on the RT pin
        no_rt @ 5 => Flag,
        /// Thermal shutdown protection is active
        thermal_shutdown @ 4 => Flag,
        /// Input overvoltage shutdown protection is active
        vin_ovlo @ 3 => Flag,
        /// Input voltage is high enough to begin charging
        vin_gt_vbat @ 2 => Flag,
        /// Input voltage is above the switching regulator undervoltage lockout level
        vin_gt_4p2v @ 1 => Flag,
        /// INTVCC is above the telemetry system lockout level
        intvcc_gt_2p8v @ 0 => Flag
    }

    VBat(u16 @ 0x3A as VBAT_REG) {
        vbat @ 0..16 => u16
    }
    VIn(u16 @ 0x3B as VIN_REG) {
        vin @ 0..16 => u16
    }
    VOut(u16 @ 0x3C as VOUT_REG) {
        vout @ 0..16 => u16
    }
    /// Two's complement, negative while discharging.
    IBat(u16 @ 0x3D as IBAT_REG) {
        ibat @ 0..16 => u16
    }
    /// Two's complement.
    IIn(u16 @ 0x3E as IIN_REG) {
        iin @ 0..16 => u16
    }
    /// Two's complement.
    DieTemp(u16 @ 0x3F as DIE_TEMP_REG) {
        die_temp @ 0..16 => u16
    }
    ThermistorVoltage(u16 @ 0x40 as THERMISTOR_VOLTAGE_REG) {
        thermistor_voltage @ 0..16 => u16
    }
    /// Battery series resistance, per cell.
    Bsr(u16 @ 0x41 as BSR_REG) {
        bsr @ 0..16 => u16
    }

    ChemCells(u16 @ 0x43 as CHEM_CELLS_REG) {
        /// Chemistry of the battery being charged, fixed by the part variant
        chem @ 8..12 => Chemistry {
            LiIonAdjustable = 0 => "Li-Ion I²C Adjustable Voltage",
            LiIon4_2V = 1 => "Li-Ion 4.2V Fixed Charge",
            LiIon4_1V = 2 => "Li-Ion 4.1V Fixed Charge",
            LiIon4_0V = 3 => "Li-Ion 4.0V Fixed Charge",
            LiFePO4Adjustable = 4 => "LiFePO4 I²C Adjustable Voltage",
            LiFePO4Rapid = 5 => "LiFePO4 3.8V Rapid Charge",
            LiFePO4Fixed = 6 => "LiFePO4 3.6V Fixed Charge",
            LeadAcidFixed = 8 => "Lead Acid Fixed Voltage",
            LeadAcidAdjustable = 9 => "Lead Acid I²C Adjustable Voltage"
        },
        /// Cell count strapped on the CELLS0 and CELLS1 pins
        ///
        /// Always 0 while the charger is disabled.
        cell_count @ 0..4 => CellCount {
            Unknown = 0 => "UNKNOWN",
            Battery6V = 2 => "BATTERY_6V",
            Battery12V = 4 => "BATTERY_12V",
            Battery18V = 6 => "BATTERY_18V",
            Battery24V = 8 => "BATTERY_24V"
        }
    }

    IChargeDac(u16 @ 0x44 as ICHARGE_DAC_REG) {
        icharge_dac @ 0..5 => u16
    }
    VChargeDac(u16 @ 0x45 as VCHARGE_DAC_REG) {
        vcharge_dac @ 0..6 => u16
    }
    IInLimitDac(u16 @ 0x46 as IIN_LIMIT_DAC_REG) {
        iin_limit_dac @ 0..6 => u16
    }
    /// Digitally filtered battery voltage.
    VBatFilt(u16 @ 0x47 as VBAT_FILT_REG) {
        vbat_filt @ 0..16 => u16
    }
    BsrChargeCurrent(u16 @ 0x48 as BSR_CHARGE_CURRENT_REG) {
        bsr_charge_current @ 0..16 => u16
    }
    TelemetryStatus(u16 @ 0x4A as TELEMETRY_STATUS_REG) {
        /// Battery series resistance result may be inaccurate
        bsr_questionable @ 1 => Flag,
        /// Telemetry readings are valid
        telemetry_valid @ 0 => Flag
    }
    InputUndervoltageDac(u16 @ 0x4B as INPUT_UNDERVOLTAGE_DAC_REG) {
        input_undervoltage_dac @ 0..8 => u16
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use device_descriptor::{FieldLabel, ReadOnlyRegister, UnknownRegister};

    #[test]
    fn addresses() {
        #[rustfmt::skip]
        let table = [
            ("VBAT_LO_ALERT_LIMIT_REG", 0x01),
            ("VBAT_HI_ALERT_LIMIT_REG", 0x02),
            ("VIN_LO_ALERT_LIMIT_REG", 0x03),
            ("VIN_HI_ALERT_LIMIT_REG", 0x04),
            ("VOUT_LO_ALERT_LIMIT_REG", 0x05),
            ("VOUT_HI_ALERT_LIMIT_REG", 0x06),
            ("IIN_HI_ALERT_LIMIT_REG", 0x07),
            ("IBAT_LO_ALERT_LIMIT_REG", 0x08),
            ("DIE_TEMP_HI_ALERT_LIMIT_REG", 0x09),
            ("BSR_HI_ALERT_LIMIT_REG", 0x0A),
            ("THERMISTOR_VOLTAGE_HI_ALERT_LIMIT_REG", 0x0B),
            ("THERMISTOR_VOLTAGE_LO_ALERT_LIMIT_REG", 0x0C),
            ("EN_LIMIT_ALERTS_REG", 0x0D),
            ("EN_CHARGER_STATE_ALERTS_REG", 0x0E),
            ("EN_CHARGE_STATUS_ALERTS_REG", 0x0F),
            ("THERMAL_REG_START_TEMP_REG", 0x10),
            ("THERMAL_REG_END_TEMP_REG", 0x11),
            ("CONFIG_BITS_REG", 0x14),
            ("IIN_LIMIT_TARGET_REG", 0x15),
            ("INPUT_UNDERVOLTAGE_SETTING_REG", 0x16),
            ("ARM_SHIP_MODE_REG", 0x19),
            ("CHARGE_CURRENT_SETTING_REG", 0x1A),
            ("VCHARGE_SETTING_REG", 0x1B),
            ("C_OVER_X_THRESHOLD_REG", 0x1C),
            ("CHARGER_CONFIG_BITS_REG", 0x29),
            ("VABSORB_DELTA_REG", 0x2A),
            ("MAX_ABSORB_TIME_REG", 0x2B),
            ("V_EQUALIZE_DELTA_REG", 0x2C),
            ("EQUALIZE_TIME_REG", 0x2D),
            ("TABSORBTIMER_REG", 0x32),
            ("TEQUALIZETIMER_REG", 0x33),
            ("CHARGER_STATE_REG", 0x34),
            ("CHARGE_STATUS_REG", 0x35),
            ("LIMIT_ALERTS_REG", 0x36),
            ("CHARGER_STATE_ALERTS_REG", 0x37),
            ("CHARGE_STATUS_ALERTS_REG", 0x38),
            ("SYSTEM_STATUS_REG", 0x39),
            ("VBAT_REG", 0x3A),
            ("VIN_REG", 0x3B),
            ("VOUT_REG", 0x3C),
            ("IBAT_REG", 0x3D),
            ("IIN_REG", 0x3E),
            ("DIE_TEMP_REG", 0x3F),
            ("THERMISTOR_VOLTAGE_REG", 0x40),
            ("BSR_REG", 0x41),
            ("CHEM_CELLS_REG", 0x43),
            ("ICHARGE_DAC_REG", 0x44),
            ("VCHARGE_DAC_REG", 0x45),
            ("IIN_LIMIT_DAC_REG", 0x46),
            ("VBAT_FILT_REG", 0x47),
            ("BSR_CHARGE_CURRENT_REG", 0x48),
            ("TELEMETRY_STATUS_REG", 0x4A),
            ("INPUT_UNDERVOLTAGE_DAC_REG", 0x4B),
        ];

        for (name, address) in table {
            assert_eq!(address_of(name), Ok(address), "{name}");
        }
        assert_eq!(REGISTERS.len(), table.len());

        assert_eq!(VBAT_REG, 0x3A);
        assert_eq!(ChargerState::ADDRESS, 0x34);
    }

    #[test]
    fn unknown_names() {
        assert_eq!(address_of("VBAT"), Err(UnknownRegister));
        assert_eq!(address_of("vbat_reg"), Err(UnknownRegister));
        assert_eq!(address_of(""), Err(UnknownRegister));
    }

    #[test]
    fn map_is_consistent() {
        for (i, reg) in REGISTERS.iter().enumerate() {
            assert!((0x01..=0x4B).contains(&reg.address), "{}", reg.name);

            // names and addresses are unique
            for other in &REGISTERS[i + 1..] {
                assert_ne!(reg.name, other.name);
                assert_ne!(reg.address, other.address, "{} / {}", reg.name, other.name);
            }

            for field in reg.fields {
                assert!(field.pos + field.width <= 16, "{}.{}", reg.name, field.name);
            }
        }
    }

    #[test]
    fn chem_cells_decomposition() {
        let fields: Vec<_> = ChemCells::from_bits(0x0210).fields().collect();

        assert_eq!(fields[0].name, "chem");
        assert_eq!(fields[0].value, 2);
        assert_eq!(
            fields[0].label,
            Some(FieldLabel::Known("Li-Ion 4.1V Fixed Charge"))
        );
        assert_eq!(fields[1].name, "cell_count");
        assert_eq!(fields[1].value, 0);
        assert_eq!(fields[1].label, Some(FieldLabel::Known("UNKNOWN")));

        let reg = ChemCells::from_bits(0x0904);
        assert_eq!(reg.chem().read(), Some(Chemistry::LeadAcidAdjustable));
        assert_eq!(reg.cell_count().read(), Some(CellCount::Battery12V));
    }

    #[test]
    fn unrecognized_chemistry() {
        let reg = ChemCells::from_bits(0x0703);

        assert_eq!(reg.chem().read(), None);
        assert_eq!(reg.chem().read_field_bits(), 7);
        assert_eq!(reg.cell_count().read(), None);

        let labels: Vec<_> = reg.fields().map(|field| field.label).collect();
        assert_eq!(
            labels,
            [Some(FieldLabel::Unrecognized), Some(FieldLabel::Unrecognized)]
        );
    }

    #[test]
    fn charger_state_labels() {
        let table = ChargerStateCode::TABLE;

        assert_eq!(table.label(512), "Absorb");
        assert_eq!(table.label(4096), "Bat Detect Failed");
        assert_eq!(table.label(2048), "Bat Detection");
        assert_eq!(table.label(64), "CC/CV Charge");
        assert_eq!(table.label(1024), "Equalize");
        assert_eq!(table.label(2), "Open Battery");
        assert_eq!(table.label(0), "None");
        assert_eq!(table.label(3), "None");
        assert_eq!(table.label(8192), "None");
    }

    #[test]
    fn charge_status_labels() {
        let table = ChargeStatusCode::TABLE;

        assert_eq!(table.label(16), "Thermal Regulation");
        assert_eq!(table.label(1), "Constant Voltage");
        assert_eq!(table.label(3), "None");
        assert_eq!(table.label(512), "None");

        let active: Vec<_> = table.flags(3).collect();
        assert_eq!(active, ["Constant Current", "Constant Voltage"]);
    }

    #[test]
    fn system_status_flags() {
        let set: Vec<_> = SystemStatus::DESCRIPTOR
            .set_flags(0x0105)
            .map(|field| field.name)
            .collect();
        assert_eq!(set, ["en_chg", "vin_gt_vbat", "intvcc_gt_2p8v"]);

        assert_eq!(SystemStatus::DESCRIPTOR.set_flags(0).count(), 0);

        let reg = SystemStatus::from_bits(0x0080);
        assert_eq!(reg.cell_count_err().read(), Some(Flag::Set));
        assert_eq!(reg.en_chg().read(), Some(Flag::Clear));
    }

    #[test]
    fn flag_summaries() {
        let field = SystemStatus::DESCRIPTOR.field("cell_count_err").unwrap();
        assert_eq!(
            field.summary(),
            "Cell count pins are programmed for an unsupported battery voltage"
        );

        let field = VBat::DESCRIPTOR.field("vbat").unwrap();
        assert_eq!(field.summary(), "vbat");
        assert!(!field.is_flag());
    }
}
