//! The C surface as a foreign caller sees it: values come out of the
//! `export_*` helpers and go back through the `sdr_*` release functions.

use std::ffi::{CStr, c_char};
use std::ptr;

use sdr_marshal::ffi::export::{
    export_arg_info_list, export_kwargs_list, export_strings, export_u32_list,
};
use sdr_marshal::ffi::functions::{
    sdr_arg_info_list_clear, sdr_kwargs_clear, sdr_kwargs_from_string, sdr_kwargs_get,
    sdr_kwargs_list_clear, sdr_kwargs_set, sdr_kwargs_to_string, sdr_string_free,
    sdr_strings_clear, sdr_u32_list_free,
};
use sdr_marshal::ffi::types::{SdrArgInfoType, SdrError, SdrKwargs};
use sdr_marshal::{from_flat_arg_info_list, from_flat_kwargs, from_flat_kwargs_list, from_str_array};
use sdr_types::kwargs::from_markup;
use sdr_types::{ArgInfo, ArgType, Range};

fn read(ptr: *const c_char) -> String {
    assert!(!ptr.is_null());
    // Safety: strings in these tests come from the library.
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

#[test]
fn enumerate_devices() {
    let found = vec![
        from_markup("driver=rtlsdr, label=Generic RTL2832U, serial=00000001"),
        from_markup("driver=lime, label=LimeSDR Mini"),
    ];
    let mut length = 0;
    let devices = export_kwargs_list(&found, &mut length).unwrap();
    assert_eq!(length, 2);

    // Safety: `devices` holds `length` maps.
    let second = unsafe { &*devices.add(1) };
    assert_eq!(read(sdr_kwargs_get(second, c"driver".as_ptr())), "lime");
    assert_eq!(unsafe { from_flat_kwargs_list(devices, length) }, found);

    sdr_kwargs_list_clear(devices, length);
}

#[test]
fn build_args_in_c_then_read_in_rust() {
    let mut args = SdrKwargs::default();
    assert_eq!(sdr_kwargs_from_string(c"driver=hackrf".as_ptr(), &mut args), SdrError::None);
    assert_eq!(sdr_kwargs_set(&mut args, c"bias_tx".as_ptr(), c"1".as_ptr()), SdrError::None);

    // Safety: built by the library.
    let back = unsafe { from_flat_kwargs(&args) };
    assert_eq!(back, from_markup("bias_tx=1, driver=hackrf"));

    let markup = sdr_kwargs_to_string(&args);
    assert_eq!(read(markup), "bias_tx=1, driver=hackrf");
    sdr_string_free(markup);
    sdr_kwargs_clear(&mut args);
    assert_eq!(args.size, 0);
}

#[test]
fn setting_info_reaches_c_intact() {
    let mut buffer = ArgInfo::new("buffers", ArgType::Int);
    buffer.value = "15".into();
    buffer.name = "Buffer count".into();
    buffer.range = Range::with_step(1.0, 64.0, 1.0);

    let mut direct = ArgInfo::new("direct_samp", ArgType::String);
    direct.value = "0".into();
    direct.options = vec!["0".into(), "1".into(), "2".into()];
    direct.option_names = vec!["Off".into(), "I-ADC".into(), "Q-ADC".into()];

    let infos = vec![buffer, direct];
    let mut length = 0;
    let flat = export_arg_info_list(&infos, &mut length).unwrap();
    assert_eq!(length, 2);

    // Safety: `flat` holds two descriptors.
    let (first, second) = unsafe { (&*flat, &*flat.add(1)) };
    assert_eq!(first.type_, SdrArgInfoType::Int);
    assert_eq!(first.range.maximum, 64.0);
    assert_eq!(second.num_options, 3);
    // Safety: both option arrays hold `num_options` strings.
    unsafe {
        assert_eq!(read(*second.options.add(2)), "2");
        assert_eq!(read(*second.option_names.add(2)), "Q-ADC");
    }
    assert_eq!(unsafe { from_flat_arg_info_list(flat, length) }, infos);

    sdr_arg_info_list_clear(flat, length);
}

#[test]
fn string_and_numeric_lists() {
    let antennas = ["RX", "TX/RX", "CAL"];
    let mut length = 0;
    let mut names = export_strings(&antennas, &mut length).unwrap();
    assert_eq!(unsafe { from_str_array(names, length) }, antennas);
    sdr_strings_clear(&mut names, length);
    assert!(names.is_null());

    let rates = export_u32_list(&[250_000, 1_024_000, 2_048_000], &mut length).unwrap();
    assert_eq!(length, 3);
    // Safety: three values were exported.
    assert_eq!(unsafe { *rates.add(1) }, 1_024_000);
    sdr_u32_list_free(rates, length);
}

#[test]
fn null_inputs_are_rejected() {
    assert_eq!(
        sdr_kwargs_from_string(ptr::null(), &mut SdrKwargs::default()),
        SdrError::NullPointer
    );
    assert!(sdr_kwargs_get(ptr::null(), c"driver".as_ptr()).is_null());
    assert!(sdr_kwargs_to_string(ptr::null()).is_null());
}
