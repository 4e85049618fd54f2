use std::convert::TryFrom;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tsgrid::{
    read_body, run, zero_fill, Config, GridLayout, Mode, StationSpec, TsGridError, TsHeader,
    TSHEADER_SIZE,
};

fn small_header() -> TsHeader {
    TsHeader {
        ix0: 0,
        iy0: 0,
        iz0: 0,
        it0: 0,
        nx: 2,
        ny: 2,
        nz: 1,
        nt: 4,
        dx: 2.0,
        dy: 2.0,
        dz: 2.0,
        dt: 0.1,
        modelrot: -55.0,
        modellat: 34.1,
        modellon: -118.2,
    }
}

fn write_template(path: &Path, head: &TsHeader) -> Result<(), TsGridError> {
    let mut file = File::create(path)?;
    head.write_to(&mut file)?;
    Ok(())
}

fn write_binary_trace(path: &Path, samples: &[f32]) {
    let mut file = File::create(path).unwrap();
    for v in samples {
        file.write_all(&v.to_ne_bytes()).unwrap();
    }
}

fn insert_config(out_tsfile: PathBuf, intmem: bool, stations: StationSpec) -> Config {
    Config {
        out_tsfile,
        inbin: true,
        swap_bytes: false,
        nt: None,
        dt: None,
        mode: Mode::Insert { intmem, stations },
    }
}

#[test]
fn zero_fill_then_insert_scenario() -> Result<(), TsGridError> {
    let head = small_header();
    let layout = GridLayout::try_from(&head)?;
    let dir = tempfile::tempdir()?;
    let template = dir.path().join("template.e3d");
    let grid = dir.path().join("grid.e3d");
    write_template(&template, &head)?;

    // zero-fill from the header-only template
    let config = Config {
        out_tsfile: grid.clone(),
        inbin: true,
        swap_bytes: false,
        nt: None,
        dt: None,
        mode: Mode::ZeroFill {
            in_tsfile: template,
        },
    };
    let reread = run(&config)?;
    assert_eq!(reread, head);
    let expected_size = TSHEADER_SIZE as u64 + 2 * 2 * 1 * 3 * 4 * 4;
    assert_eq!(std::fs::metadata(&grid)?.len(), expected_size);

    // insert station (1,0) with known component traces
    let comps = [
        [1.0f32, 2.0, 3.0, 4.0],
        [5.0, 6.0, 7.0, 8.0],
        [9.0, 10.0, 11.0, 12.0],
    ];
    let trace_paths: Vec<PathBuf> = (0..3)
        .map(|c| dir.path().join(format!("sta.{}", c)))
        .collect();
    for (path, samples) in trace_paths.iter().zip(&comps) {
        write_binary_trace(path, samples);
    }
    let config = insert_config(
        grid.clone(),
        true,
        StationSpec::Single(tsgrid::StationEntry::new(
            1,
            0,
            trace_paths[0].clone(),
            trace_paths[1].clone(),
            trace_paths[2].clone(),
        )),
    );
    run(&config)?;

    let body = read_body(&grid, &layout)?;
    for comp in 0..3 {
        for t in 0..4 {
            assert_eq!(body[layout.float_index(comp, t, 1, 0)], comps[comp][t]);
            for (ix, iy) in [(0, 0), (0, 1), (1, 1)] {
                assert_eq!(body[layout.float_index(comp, t, ix, iy)], 0.0);
            }
        }
    }
    Ok(())
}

#[test]
fn engines_agree_on_filelist_run() -> Result<(), TsGridError> {
    let head = small_header();
    let dir = tempfile::tempdir()?;

    // two stations, three binary traces each
    let mut filelist = String::new();
    for (i, (ixp, iyp)) in [(0i32, 0i32), (1, 1)].iter().enumerate() {
        let mut paths = Vec::new();
        for c in 0..3 {
            let path = dir.path().join(format!("sta{}.{}", i, c));
            let base = (i * 100 + c * 10) as f32;
            write_binary_trace(&path, &[base, base + 1.0, base + 2.0, base + 3.0]);
            paths.push(path);
        }
        filelist.push_str(&format!(
            "{} {} {} {} {}\n",
            ixp,
            iyp,
            paths[0].display(),
            paths[1].display(),
            paths[2].display()
        ));
    }
    let list_path = dir.path().join("stat.list");
    std::fs::write(&list_path, &filelist)?;

    let mut outputs = Vec::new();
    for intmem in [true, false] {
        let grid = dir.path().join(format!("grid-intmem{}.e3d", intmem));
        zero_fill(&grid, &head)?;
        let config = insert_config(grid.clone(), intmem, StationSpec::List(list_path.clone()));
        run(&config)?;
        outputs.push(std::fs::read(&grid)?);
    }
    assert_eq!(outputs[0], outputs[1]);
    Ok(())
}

#[test]
fn swapped_template_zero_fill() -> Result<(), TsGridError> {
    let head = small_header();
    let dir = tempfile::tempdir()?;
    let template = dir.path().join("template-swapped.e3d");
    let grid = dir.path().join("grid.e3d");
    // a template produced on a machine of the other endianness
    write_template(&template, &head.swapped())?;

    let config = Config {
        out_tsfile: grid.clone(),
        inbin: true,
        swap_bytes: true,
        nt: None,
        dt: None,
        mode: Mode::ZeroFill {
            in_tsfile: template,
        },
    };
    let resolved = run(&config)?;
    assert_eq!(resolved, head);
    let expected_size = TSHEADER_SIZE as u64 + 2 * 2 * 1 * 3 * 4 * 4;
    assert_eq!(std::fs::metadata(&grid)?.len(), expected_size);
    Ok(())
}

#[test]
fn nt_override_resizes_zero_fill_but_not_insert_header() -> Result<(), TsGridError> {
    let head = small_header();
    let dir = tempfile::tempdir()?;
    let template = dir.path().join("template.e3d");
    let grid = dir.path().join("grid.e3d");
    write_template(&template, &head)?;

    let config = Config {
        out_tsfile: grid.clone(),
        inbin: true,
        swap_bytes: false,
        nt: Some(8),
        dt: Some(0.05),
        mode: Mode::ZeroFill {
            in_tsfile: template,
        },
    };
    run(&config)?;
    // the override is part of the new on-disk header
    let mut file = File::open(&grid)?;
    let on_disk = TsHeader::from_reader(&mut file)?;
    assert_eq!(on_disk.nt, 8);
    assert_eq!(on_disk.dt, 0.05);
    let expected_size = TSHEADER_SIZE as u64 + 2 * 2 * 1 * 3 * 8 * 4;
    assert_eq!(std::fs::metadata(&grid)?.len(), expected_size);

    // an insertion run with nt override must not rewrite the header
    let trace = dir.path().join("sta.trace");
    write_binary_trace(&trace, &[1.0, 2.0, 3.0, 4.0]);
    let mut config = insert_config(
        grid.clone(),
        true,
        StationSpec::Single(tsgrid::StationEntry::new(
            0,
            0,
            trace.clone(),
            trace.clone(),
            trace.clone(),
        )),
    );
    config.nt = Some(4);
    run(&config)?;
    let mut file = File::open(&grid)?;
    let after = TsHeader::from_reader(&mut file)?;
    assert_eq!(after.nt, 8);
    Ok(())
}
