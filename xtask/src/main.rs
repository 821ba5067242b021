use anyhow::{anyhow, bail, Context, Result};
use dft_rs::kernel::KernelLifecycle;
use dft_rs::na::Complex;
use dft_rs::signal::dft::{
    dft, idft, split_parts, DftConfig, DftKernel, IdftConfig, IdftKernel, ImaginaryPolicy,
};
use dft_rs::signal::traits::{BoxPulse1D, Dft1D, Idft1D, Sinusoid1D};
use dft_rs::signal::wave::{
    box_signal, cosine, sine, BoxPulseConfig, BoxPulseKernel, SinusoidConfig, SinusoidKernel,
    SinusoidKind,
};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const DEFAULT_PYTHON_BIN: &str = "python";

const PY_SIGNAL_SCRIPT: &str = r#"
import json
import sys
import time
import numpy as np

env = json.loads(sys.stdin.read())
op = env["op"]
iters = int(env["iters"])
p = env["payload"]

def _as_array(key):
    return np.asarray(p[key], dtype=float)

def _as_complex(key):
    parts = np.asarray(p[key], dtype=float)
    half = parts.shape[0] // 2
    return parts[:half] + 1j * parts[half:]

def _parts(z):
    z = np.asarray(z, dtype=complex).reshape(-1)
    return np.concatenate([z.real, z.imag])

def _compute():
    if op == "cosine":
        n = np.arange(int(p["len"]))
        return np.cos(2.0 * np.pi * int(p["f"]) * n / int(p["len"]))
    if op == "sine":
        n = np.arange(int(p["len"]))
        return np.sin(2.0 * np.pi * int(p["f"]) * n / int(p["len"]))
    if op == "box":
        x = np.zeros(int(p["len"]))
        offset = int(p["offset"])
        x[offset:offset + int(p["width"])] = 1.0
        return x
    if op == "dft":
        return _parts(np.fft.fft(_as_array("x")))
    if op == "idft":
        return np.fft.ifft(_as_complex("spectrum")).real

    raise RuntimeError(f"unsupported op: {op}")

y = np.asarray(_compute(), dtype=float).reshape(-1)

t0 = time.perf_counter_ns()
for _ in range(iters):
    _compute()
t1 = time.perf_counter_ns()

print(json.dumps({
    "output": y.tolist(),
    "avg_ns": (t1 - t0) / max(iters, 1),
    "python_version": sys.version.split()[0],
    "numpy_version": np.__version__
}))
"#;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct PythonEval {
    output: Vec<f64>,
    avg_ns: f64,
    python_version: String,
    numpy_version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ContractRow {
    case_id: String,
    len: usize,
    pearson_r: f64,
    mae: f64,
    rmse: f64,
    max_abs: f64,
    rust_ns: f64,
    python_ns: f64,
    speedup_vs_python: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContractBundle {
    generated_epoch_seconds: u64,
    python_executable: String,
    python_version: String,
    numpy_version: String,
    rows: Vec<ContractRow>,
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("explore") => {
            let rest: Vec<String> = args.collect();
            run_explore(&rest)
        }
        Some("contracts") => run_contracts(),
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- explore <f> <N> <offset> <width>");
            eprintln!("  cargo run -p xtask -- contracts");
            Ok(())
        }
    }
}

/// Parameters for one `explore` run, validated before any library call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExploreParams {
    frequency: i64,
    len: usize,
    offset: usize,
    width: usize,
}

fn parse_explore_args(args: &[String]) -> Result<ExploreParams> {
    let [f, n, offset, width] = args else {
        bail!("explore expects exactly four arguments: <f> <N> <offset> <width>");
    };
    let frequency: i64 = f
        .parse()
        .with_context(|| format!("parsing frequency {f:?}"))?;
    let n: i64 = n.parse().with_context(|| format!("parsing N {n:?}"))?;
    let offset: i64 = offset
        .parse()
        .with_context(|| format!("parsing offset {offset:?}"))?;
    let width: i64 = width
        .parse()
        .with_context(|| format!("parsing width {width:?}"))?;

    if n <= 0 {
        bail!("N must be positive, got {n}");
    }
    if offset < 0 || width < 0 {
        bail!("box offset and width must be non-negative, got offset={offset}, width={width}");
    }
    if width >= n {
        bail!("box width must be smaller than N, got width={width}, N={n}");
    }

    Ok(ExploreParams {
        frequency,
        len: usize::try_from(n).context("N does not fit in usize")?,
        offset: usize::try_from(offset).context("offset does not fit in usize")?,
        width: usize::try_from(width).context("width does not fit in usize")?,
    })
}

fn run_explore(args: &[String]) -> Result<()> {
    let params = parse_explore_args(args)?;
    let ExploreParams {
        frequency,
        len,
        offset,
        width,
    } = params;

    let signals: [(String, Array1<f64>); 4] = [
        (
            format!("cosine f={frequency}"),
            cosine(frequency, len).context("generating cosine")?,
        ),
        (
            format!("sine f={frequency}"),
            sine(frequency, len).context("generating sine")?,
        ),
        (
            format!("box width={width}"),
            box_signal(len, width, 0).context("generating box")?,
        ),
        (
            format!("box width={width} offset={offset}"),
            box_signal(len, width, offset).context("generating shifted box")?,
        ),
    ];

    for (label, x) in &signals {
        let spectrum = dft(x).with_context(|| format!("forward transform of {label}"))?;
        let y: Array1<f64> =
            idft(&spectrum).with_context(|| format!("inverse transform of {label}"))?;
        print_table(label, x, &spectrum, &y);
    }

    Ok(())
}

fn print_table(label: &str, x: &Array1<f64>, spectrum: &Array1<Complex<f64>>, y: &Array1<f64>) {
    println!("== {label} (N = {}) ==", x.len());
    println!(
        "{:>6} {:>14} {:>14} {:>14} {:>14}",
        "n", "x[n]", "Re X[n]", "Im X[n]", "idft[n]"
    );
    for (n, ((xn, bin), yn)) in x.iter().zip(spectrum.iter()).zip(y.iter()).enumerate() {
        println!(
            "{n:>6} {xn:>14.6} {:>14.6} {:>14.6} {yn:>14.6}",
            bin.re, bin.im
        );
    }
    println!();
}

fn run_contracts() -> Result<()> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let out_dir = PathBuf::from(format!("target/contracts/{ts}"));
    fs::create_dir_all(&out_dir).context("creating contract output directory")?;

    let python_bin = detect_python_bin();
    let mut rows = Vec::new();

    // Shared synthetic input for the transform cases.
    let signal: Vec<f64> = (0..128)
        .map(|i| {
            let x = i as f64 / 9.0;
            x.sin() + 0.35 * (2.3 * x).cos() + 0.1 * (7.0 * x).sin()
        })
        .collect();

    // Sinusoids
    for (kind, op, frequency, len) in [
        (SinusoidKind::Cosine, "cosine", 3i64, 64usize),
        (SinusoidKind::Cosine, "cosine", -5, 100),
        (SinusoidKind::Sine, "sine", 7, 64),
        (SinusoidKind::Sine, "sine", 130, 100),
    ] {
        let case_id = format!("{op}_f{frequency}_n{len}");
        let kernel = SinusoidKernel::try_new(SinusoidConfig {
            kind,
            frequency,
            len,
        })?;
        let candidate: Vec<f64> = kernel
            .run_alloc()
            .map_err(|e| anyhow!("{case_id} candidate execution failed: {e}"))?;
        let py = python_signal_eval(
            &python_bin,
            op,
            json!({ "f": frequency, "len": len }),
            500,
        )?;
        let rust_ns = benchmark_avg_ns(500, || {
            Sinusoid1D::<f64>::run_alloc(&kernel)
                .map(|_| ())
                .map_err(|e| anyhow!("{case_id} candidate benchmark failed: {e}"))
        })?;
        record_case(&mut rows, &case_id, candidate, py, rust_ns)?;
    }

    // Box pulses
    for (len, width, offset) in [(64usize, 12usize, 0usize), (64, 12, 20), (100, 0, 40)] {
        let case_id = format!("box_n{len}_w{width}_o{offset}");
        let kernel = BoxPulseKernel::try_new(BoxPulseConfig { len, width, offset })?;
        let candidate: Vec<f64> = kernel
            .run_alloc()
            .map_err(|e| anyhow!("{case_id} candidate execution failed: {e}"))?;
        let py = python_signal_eval(
            &python_bin,
            "box",
            json!({ "len": len, "width": width, "offset": offset }),
            500,
        )?;
        let rust_ns = benchmark_avg_ns(500, || {
            BoxPulse1D::<f64>::run_alloc(&kernel)
                .map(|_| ())
                .map_err(|e| anyhow!("{case_id} candidate benchmark failed: {e}"))
        })?;
        record_case(&mut rows, &case_id, candidate, py, rust_ns)?;
    }

    // Forward transform
    {
        let case_id = "dft_mixed_n128";
        let kernel = DftKernel::try_new(DftConfig { len: signal.len() })?;
        let spectrum = Dft1D::<f64>::run_alloc(&kernel, signal.as_slice())
            .map_err(|e| anyhow!("dft candidate execution failed: {e}"))?;
        let candidate = complex_parts(&spectrum);
        let py = python_signal_eval(&python_bin, "dft", json!({ "x": signal }), 200)?;
        let rust_ns = benchmark_avg_ns(50, || {
            Dft1D::<f64>::run_alloc(&kernel, signal.as_slice())
                .map(|_| ())
                .map_err(|e| anyhow!("dft candidate benchmark failed: {e}"))
        })?;
        record_case(&mut rows, case_id, candidate, py, rust_ns)?;
    }

    // Inverse transform
    {
        let case_id = "idft_mixed_n128";
        let spectrum = dft(&signal).context("building idft input spectrum")?;
        let kernel = IdftKernel::<f64>::try_new(IdftConfig {
            len: spectrum.len(),
            imaginary: ImaginaryPolicy::Discard,
        })?;
        let candidate = kernel
            .run_alloc(&spectrum)
            .map_err(|e| anyhow!("idft candidate execution failed: {e}"))?;
        let py = python_signal_eval(
            &python_bin,
            "idft",
            json!({ "spectrum": complex_parts(&spectrum.to_vec()) }),
            200,
        )?;
        let rust_ns = benchmark_avg_ns(50, || {
            kernel
                .run_alloc(&spectrum)
                .map(|_| ())
                .map_err(|e| anyhow!("idft candidate benchmark failed: {e}"))
        })?;
        record_case(&mut rows, case_id, candidate, py, rust_ns)?;
    }

    let version_probe = python_versions(&python_bin)?;
    let bundle = ContractBundle {
        generated_epoch_seconds: ts,
        python_executable: python_bin.to_string_lossy().into_owned(),
        python_version: version_probe.python_version,
        numpy_version: version_probe.numpy_version,
        rows,
    };

    write_summary_csv(&out_dir.join("summary.csv"), &bundle.rows)?;
    fs::write(
        out_dir.join("summary.json"),
        serde_json::to_vec_pretty(&bundle).context("serializing summary bundle")?,
    )
    .context("writing summary.json")?;

    println!("Contract artifacts generated in: {}", out_dir.display());
    println!("  - {}", out_dir.join("summary.csv").display());
    println!("  - {}", out_dir.join("summary.json").display());
    println!("  - cases: {}", bundle.rows.len());

    Ok(())
}

/// Real parts followed by imaginary parts, the layout the Python side expects.
fn complex_parts(spectrum: &[Complex<f64>]) -> Vec<f64> {
    let (re, im) = split_parts(spectrum);
    re.iter().chain(im.iter()).copied().collect()
}

fn detect_python_bin() -> PathBuf {
    PathBuf::from(DEFAULT_PYTHON_BIN)
}

fn python_versions(python_bin: &Path) -> Result<PythonEval> {
    run_python_eval(
        python_bin,
        r#"
import json, sys
import numpy
payload = json.loads(sys.stdin.read())
print(json.dumps({
    "output": [],
    "avg_ns": 0.0,
    "python_version": sys.version.split()[0],
    "numpy_version": numpy.__version__
}))
"#,
        json!({}),
    )
}

fn python_signal_eval(
    python_bin: &Path,
    op: &str,
    payload: serde_json::Value,
    iters: usize,
) -> Result<PythonEval> {
    run_python_eval(
        python_bin,
        PY_SIGNAL_SCRIPT,
        json!({
            "op": op,
            "iters": iters,
            "payload": payload
        }),
    )
}

fn run_python_eval(
    python_bin: &Path,
    script: &str,
    payload: serde_json::Value,
) -> Result<PythonEval> {
    let mut child = Command::new(python_bin)
        .arg("-c")
        .arg(script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning python interpreter at {}", python_bin.display()))?;

    {
        let stdin = child.stdin.as_mut().context("opening python stdin")?;
        let payload_bytes = serde_json::to_vec(&payload).context("serializing python payload")?;
        stdin
            .write_all(&payload_bytes)
            .context("writing payload to python stdin")?;
    }

    let output = child
        .wait_with_output()
        .context("waiting for python process")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("python execution failed: {stderr}");
    }
    let stdout = String::from_utf8(output.stdout).context("parsing python stdout utf8")?;
    let parsed: PythonEval = serde_json::from_str(stdout.trim()).context("parsing python json")?;
    Ok(parsed)
}

fn record_case(
    rows: &mut Vec<ContractRow>,
    case_id: &str,
    candidate: Vec<f64>,
    py: PythonEval,
    rust_ns: f64,
) -> Result<()> {
    ensure_same_length(case_id, &candidate, &py.output)?;
    rows.push(build_row(case_id, &candidate, &py.output, rust_ns, py.avg_ns));
    Ok(())
}

fn ensure_same_length(case_id: &str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        bail!(
            "case {case_id} has mismatched output lengths: left={}, right={}",
            a.len(),
            b.len()
        );
    }
    Ok(())
}

fn benchmark_avg_ns<F>(iters: usize, mut f: F) -> Result<f64>
where
    F: FnMut() -> Result<()>,
{
    let start = Instant::now();
    for _ in 0..iters {
        f()?;
    }
    Ok(start.elapsed().as_nanos() as f64 / iters as f64)
}

fn build_row(
    case_id: &str,
    rust: &[f64],
    python: &[f64],
    rust_ns: f64,
    python_ns: f64,
) -> ContractRow {
    ContractRow {
        case_id: case_id.to_string(),
        len: rust.len(),
        pearson_r: pearson(rust, python),
        mae: mean_abs_error(rust, python),
        rmse: root_mean_squared_error(rust, python),
        max_abs: max_abs_error(rust, python),
        rust_ns,
        python_ns,
        speedup_vs_python: python_ns / rust_ns,
    }
}

fn mean_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .sum::<f64>()
        / a.len() as f64
}

fn root_mean_squared_error(a: &[f64], b: &[f64]) -> f64 {
    (a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        / a.len() as f64)
        .sqrt()
}

fn max_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let da = *x - mean_a;
        let db = *y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    // Constant outputs (an all-zero box) have no correlation to speak of.
    if var_a == 0.0 || var_b == 0.0 {
        if a == b {
            1.0
        } else {
            0.0
        }
    } else {
        cov / (var_a.sqrt() * var_b.sqrt())
    }
}

fn write_summary_csv(path: &Path, rows: &[ContractRow]) -> Result<()> {
    let mut out = String::new();
    out.push_str("case_id,len,pearson_r,mae,rmse,max_abs,rust_ns,python_ns,speedup_vs_python\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{:.12},{:.12},{:.12},{:.12},{:.3},{:.3},{:.6}\n",
            row.case_id,
            row.len,
            row.pearson_r,
            row.mae,
            row.rmse,
            row.max_abs,
            row.rust_ns,
            row.python_ns,
            row.speedup_vs_python,
        ));
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}
