use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sigcast::kernel::KernelLifecycle;
use sigcast::signal::convolve::{
    convolve_direct, xcorr_valid, ConvolveConfig, ConvolveKernel, ConvolveMethod,
};
use sigcast::signal::fft::{Direction, FftConfig, FftKernel, TransformMethod};
use sigcast::signal::filter::{
    lfilter, lfiltic, LFilterConfig, LFilterKernel, LFilticConfig, LFilticKernel,
};
use sigcast::signal::traits::{Convolve1D, LFilter1D, LFilticDesign1D, Transform1D};
use sigcast::Complex;
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
import scipy
import scipy.signal

env = json.loads(sys.stdin.read())
op = env["op"]
iters = int(env["iters"])
p = env["payload"]

def _as_array(key):
    return np.asarray(p[key], dtype=float)

def _compute():
    if op == "fft":
        z = _as_array("re") + 1j * _as_array("im")
        y = np.fft.fft(z)
        return np.concatenate([y.real, y.imag])
    if op == "convolve":
        return np.convolve(_as_array("in1"), _as_array("in2"), mode="full")
    if op == "xcorr_valid":
        return np.correlate(_as_array("v"), _as_array("u"), mode="valid")
    if op == "lfilter":
        y, zf = scipy.signal.lfilter(_as_array("b"), _as_array("a"), _as_array("x"), zi=_as_array("zi"))
        return np.concatenate([y, zf])
    if op == "lfiltic":
        return scipy.signal.lfiltic(_as_array("b"), _as_array("a"), _as_array("y"), _as_array("x"))

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
    "numpy_version": np.__version__,
    "scipy_version": scipy.__version__
}))
"#;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct PythonEval {
    output: Vec<f64>,
    avg_ns: f64,
    python_version: String,
    numpy_version: String,
    scipy_version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ContractRow {
    case_id: String,
    pearson_r: f64,
    mae: f64,
    rmse: f64,
    max_abs: f64,
    rust_candidate_ns: f64,
    rust_baseline_ns: f64,
    python_ns: f64,
    speedup_vs_baseline: f64,
    speedup_vs_python: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContractBundle {
    generated_epoch_seconds: u64,
    python_executable: String,
    python_version: String,
    numpy_version: String,
    scipy_version: String,
    rows: Vec<ContractRow>,
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("contracts") => run_contracts(),
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- contracts");
            Ok(())
        }
    }
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
    let mut versions = None;

    // Shared synthetic input for the 1D cases.
    let signal: Vec<f64> = (0..512)
        .map(|i| {
            let x = i as f64 / 27.0;
            x.sin() + 0.35 * (2.3 * x).cos() + 0.1 * (7.0 * x).sin()
        })
        .collect();

    // Transform, recursive against rustfft's planned transform.
    for len in [256usize, 300] {
        let case_id = format!("fft_recursive_c128_n{len}");
        let z: Vec<Complex<f64>> = signal
            .iter()
            .zip(signal.iter().skip(7))
            .take(len)
            .map(|(re, im)| Complex::new(*re, *im))
            .collect();
        let candidate_kernel = FftKernel::try_new(FftConfig {
            direction: Direction::Forward,
            method: TransformMethod::Recursive,
        })?;
        let baseline_kernel = FftKernel::try_new(FftConfig {
            direction: Direction::Forward,
            method: TransformMethod::Planned,
        })?;
        let candidate = split_complex(
            &candidate_kernel
                .run_alloc(&z)
                .map_err(|e| anyhow!("fft candidate execution failed: {e}"))?,
        );
        let py = python_signal_eval(
            &python_bin,
            "fft",
            json!({
                "re": z.iter().map(|c| c.re).collect::<Vec<_>>(),
                "im": z.iter().map(|c| c.im).collect::<Vec<_>>(),
            }),
            200,
        )?;
        let candidate_ns = benchmark_avg_ns(120, || {
            candidate_kernel
                .run_alloc(&z)
                .map(|_| ())
                .map_err(|e| anyhow!("fft candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(120, || {
            baseline_kernel
                .run_alloc(&z)
                .map(|_| ())
                .map_err(|e| anyhow!("fft baseline benchmark failed: {e}"))
        })?;
        record_case(&mut rows, &case_id, candidate, &py, candidate_ns, baseline_ns)?;
        versions.get_or_insert(py);
    }

    // Spectral convolution against the direct sum.
    {
        let case_id = "convolve_spectral_f64";
        let in1 = signal.iter().copied().take(256).collect::<Vec<_>>();
        let in2: Vec<f64> = (0..63)
            .map(|i| {
                let x = i as f64 / 8.0;
                (-(x * x) / 8.0).exp()
            })
            .collect();
        let kernel = ConvolveKernel::try_new(ConvolveConfig {
            method: ConvolveMethod::Spectral,
        })?;
        let candidate = kernel
            .run_alloc(&in1, &in2)
            .map_err(|e| anyhow!("convolve candidate execution failed: {e}"))?;
        let py = python_signal_eval(
            &python_bin,
            "convolve",
            json!({ "in1": in1, "in2": in2 }),
            200,
        )?;
        let candidate_ns = benchmark_avg_ns(120, || {
            kernel
                .run_alloc(&in1, &in2)
                .map(|_: Vec<f64>| ())
                .map_err(|e| anyhow!("convolve candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(120, || {
            convolve_direct(&in1, &in2)
                .map(|_| ())
                .map_err(|e| anyhow!("convolve baseline benchmark failed: {e}"))
        })?;
        record_case(&mut rows, case_id, candidate, &py, candidate_ns, baseline_ns)?;
    }

    // Sliding correlation.
    {
        let case_id = "xcorr_valid_f64";
        let u = signal.iter().copied().skip(50).take(63).collect::<Vec<_>>();
        let v = signal.iter().copied().take(256).collect::<Vec<_>>();
        let candidate = xcorr_valid(&u, &v).map_err(|e| anyhow!("xcorr_valid failed: {e}"))?;
        let py = python_signal_eval(&python_bin, "xcorr_valid", json!({ "u": u, "v": v }), 200)?;
        let candidate_ns = benchmark_avg_ns(120, || {
            xcorr_valid(&u, &v)
                .map(|_| ())
                .map_err(|e| anyhow!("xcorr_valid benchmark failed: {e}"))
        })?;
        record_case(&mut rows, case_id, candidate, &py, candidate_ns, candidate_ns)?;
    }

    // Filtering with explicit state; output is `y` followed by `zf`.
    {
        let case_id = "lfilter_state_f64";
        let b = vec![0.0048, 0.0193, 0.0289, 0.0193, 0.0048];
        let a = vec![1.0, -2.3695, 2.3140, -1.0547, 0.1874];
        let zi = vec![0.1, -0.2, 0.05, 0.0];
        let kernel = LFilterKernel::try_new(LFilterConfig {
            b: b.clone(),
            a: a.clone(),
        })?;
        let (mut candidate, zf) = kernel
            .run_alloc(&signal, Some(zi.as_slice()))
            .map_err(|e| anyhow!("lfilter candidate execution failed: {e}"))?;
        candidate.extend(zf);
        let py = python_signal_eval(
            &python_bin,
            "lfilter",
            json!({ "b": b, "a": a, "x": signal, "zi": zi }),
            200,
        )?;
        let candidate_ns = benchmark_avg_ns(120, || {
            kernel
                .run_alloc(&signal, Some(zi.as_slice()))
                .map(|_| ())
                .map_err(|e| anyhow!("lfilter candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(120, || {
            lfilter(&b, &a, &signal, Some(zi.as_slice()))
                .map(|_| ())
                .map_err(|e| anyhow!("lfilter baseline benchmark failed: {e}"))
        })?;
        record_case(&mut rows, case_id, candidate, &py, candidate_ns, baseline_ns)?;
    }

    // Initial conditions from history.
    {
        let case_id = "lfiltic_f64";
        let b = vec![0.25, -0.25, 0.15, -0.12, 0.2, 0.2];
        let a = vec![1.0, 0.5, 0.3, 0.1, 0.2, 0.3];
        let y = vec![1.0, 0.2, 0.7];
        let x = vec![1.0, 2.0, 3.0];
        let kernel = LFilticKernel::try_new(LFilticConfig {
            b: b.clone(),
            a: a.clone(),
        })?;
        let candidate = kernel
            .run_alloc(&y, &x)
            .map_err(|e| anyhow!("lfiltic candidate execution failed: {e}"))?;
        let py = python_signal_eval(
            &python_bin,
            "lfiltic",
            json!({ "b": b, "a": a, "y": y, "x": x }),
            200,
        )?;
        let candidate_ns = benchmark_avg_ns(500, || {
            kernel
                .run_alloc(&y, &x)
                .map(|_| ())
                .map_err(|e| anyhow!("lfiltic candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(500, || {
            lfiltic(&b, &a, &y, &x)
                .map(|_| ())
                .map_err(|e| anyhow!("lfiltic baseline benchmark failed: {e}"))
        })?;
        record_case(&mut rows, case_id, candidate, &py, candidate_ns, baseline_ns)?;
    }

    let versions = versions.context("no python evaluation was recorded")?;
    let bundle = ContractBundle {
        generated_epoch_seconds: ts,
        python_executable: python_bin.to_string_lossy().into_owned(),
        python_version: versions.python_version,
        numpy_version: versions.numpy_version,
        scipy_version: versions.scipy_version.unwrap_or_default(),
        rows,
    };

    let summary_json = out_dir.join("summary.json");
    fs::write(
        &summary_json,
        serde_json::to_vec_pretty(&bundle).context("serializing contract bundle")?,
    )
    .with_context(|| format!("writing {}", summary_json.display()))?;
    write_summary_csv(&out_dir.join("summary.csv"), &bundle.rows)?;

    tracing::info!(cases = bundle.rows.len(), dir = %out_dir.display(), "contracts written");
    println!("Contract artifacts:");
    println!("  - {}", summary_json.display());
    println!("  - {}", out_dir.join("summary.csv").display());
    println!("  - cases: {}", bundle.rows.len());

    Ok(())
}

fn detect_python_bin() -> PathBuf {
    std::env::var_os("PYTHON")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PYTHON_BIN))
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
    py: &PythonEval,
    candidate_ns: f64,
    baseline_ns: f64,
) -> Result<()> {
    ensure_same_length(case_id, &candidate, &py.output)?;
    let row = build_row(case_id, &candidate, py, candidate_ns, baseline_ns);
    tracing::info!(case_id, max_abs = row.max_abs, pearson_r = row.pearson_r, "case recorded");
    rows.push(row);
    Ok(())
}

fn split_complex(z: &[Complex<f64>]) -> Vec<f64> {
    z.iter().map(|c| c.re).chain(z.iter().map(|c| c.im)).collect()
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
    candidate: &[f64],
    py: &PythonEval,
    candidate_ns: f64,
    baseline_ns: f64,
) -> ContractRow {
    let reference = py.output.as_slice();
    ContractRow {
        case_id: case_id.to_string(),
        pearson_r: pearson(candidate, reference),
        mae: mean_abs_error(candidate, reference),
        rmse: root_mean_squared_error(candidate, reference),
        max_abs: max_abs_error(candidate, reference),
        rust_candidate_ns: candidate_ns,
        rust_baseline_ns: baseline_ns,
        python_ns: py.avg_ns,
        speedup_vs_baseline: baseline_ns / candidate_ns,
        speedup_vs_python: py.avg_ns / candidate_ns,
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
    out.push_str("case_id,pearson_r,mae,rmse,max_abs,rust_candidate_ns,rust_baseline_ns,python_ns,speedup_vs_baseline,speedup_vs_python\n");
    for row in rows {
        out.push_str(&format!(
            "{},{:.12},{:.12},{:.12},{:.12},{:.3},{:.3},{:.3},{:.6},{:.6}\n",
            row.case_id,
            row.pearson_r,
            row.mae,
            row.rmse,
            row.max_abs,
            row.rust_candidate_ns,
            row.rust_baseline_ns,
            row.python_ns,
            row.speedup_vs_baseline,
            row.speedup_vs_python,
        ));
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}
