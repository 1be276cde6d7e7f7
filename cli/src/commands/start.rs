// Copyright 2024 Aleo Network Foundation
// This file is part of the snarkOS library.

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:

// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::helpers::{initialize_logger, parse_hashes};
use dagsync_node_ledger_service::{fmt_id, Hash, MemoryLedgerService};
use dagsync_node_requester::{MissingRequests, RequestKind, TransactionRequester};

use anyhow::{ensure, Result};
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tokio::{
    runtime::{self, Runtime},
    sync::mpsc,
};

/// Starts the transaction requester over a ledger file.
#[derive(Clone, Debug, Parser)]
pub struct Start {
    /// Specify the path to the JSON ledger file.
    #[clap(long = "ledger")]
    pub ledger: PathBuf,
    /// Specify the milestone hashes to check for solidity, comma-separated.
    #[clap(default_value = "", long = "milestones")]
    pub milestones: String,
    /// Specify the tip hashes to check for solidity, comma-separated [default: every stored transaction].
    #[clap(default_value = "", long = "check")]
    pub check: String,
    /// If the flag is set, the request lists are rebuilt from the ledger before the checks.
    #[clap(long)]
    pub rescan: bool,

    /// Specify the interval between two dispatch rounds, in milliseconds.
    #[clap(default_value = "100", long = "dispatch-interval-ms")]
    pub dispatch_interval_ms: u64,
    /// Specify the minimum interval between two queue-depth reports, in seconds.
    #[clap(default_value = "10", long = "report-interval-secs")]
    pub report_interval_secs: u64,
    /// Specify the capacity of the outbound request channel.
    #[clap(default_value = "1024", long = "outbound-capacity")]
    pub outbound_capacity: usize,

    /// If the flag is set, the node will export metrics.
    #[clap(long)]
    pub metrics: bool,
    /// Specify the IP address and port for the metrics exporter.
    #[clap(default_value = "0.0.0.0:9000", long = "metrics-ip")]
    pub metrics_ip: SocketAddr,

    /// Specify the verbosity of the node [options: 0, 1, 2, 3]
    #[clap(default_value = "1", long = "verbosity")]
    pub verbosity: u8,
    /// Specify the path to the file where logs will be stored.
    #[clap(default_value = "dagsync.log", long = "logfile")]
    pub logfile: PathBuf,
}

impl Start {
    /// Starts the transaction requester.
    pub fn parse(self) -> Result<String> {
        ensure!(self.dispatch_interval_ms > 0, "The dispatch interval must be greater than zero");
        ensure!(self.outbound_capacity > 0, "The outbound capacity must be greater than zero");

        // Initialize the logger.
        initialize_logger(self.verbosity, &self.logfile)?;
        // Initialize the metrics.
        if self.metrics {
            metrics::initialize_metrics(Some(self.metrics_ip)).map_err(anyhow::Error::msg)?;
        }

        // Initialize the runtime.
        Self::runtime()?.block_on(async move { self.run().await })
    }

    /// Loads the ledger, runs the initial solidity checks, and dispatches requests until
    /// both request lists are empty or the process is interrupted.
    async fn run(self) -> Result<String> {
        let ledger = Arc::new(MemoryLedgerService::load(&self.ledger)?);
        info!("Loaded {} transactions from '{}'", ledger.len(), self.ledger.display());

        let requests = MissingRequests::new(ledger.clone())
            .with_report_interval(Duration::from_secs(self.report_interval_secs));
        if self.rescan {
            let num_requests = requests.rescan_all()?;
            info!("Rescanned the ledger - {num_requests} transactions to request");
        }

        // Check the solidity of the milestones, then of the tips.
        let milestones = parse_hashes(&self.milestones)?;
        let tips = match parse_hashes(&self.check)? {
            hashes if hashes.is_empty() => ledger.filled_hashes(),
            hashes => hashes,
        };
        let num_solid = Self::check_all(requests.milestones(), &milestones)? + Self::check_all(requests.tips(), &tips)?;
        info!("{num_solid} of {} transactions are solid", milestones.len() + tips.len());

        // Hand the dispatched requests off to the outbound channel.
        let (outbound_sender, outbound_receiver) = mpsc::channel(self.outbound_capacity);
        let outbound = tokio::spawn(Self::outbound(outbound_receiver));

        let mut num_dispatched = 0usize;
        let mut interval = tokio::time::interval(Duration::from_millis(self.dispatch_interval_ms));
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutting down the requester...");
                    break;
                }
                _ = interval.tick() => {
                    if requests.num_total_requests() == 0 {
                        info!("There are no more transactions to request");
                        break;
                    }
                    for kind in [RequestKind::Milestone, RequestKind::Tip] {
                        match requests.get(kind).transaction_to_request() {
                            Ok(Some(hash)) => {
                                if outbound_sender.send((kind, hash)).await.is_err() {
                                    warn!("The outbound request channel is closed");
                                }
                                num_dispatched += 1;
                            }
                            Ok(None) => (),
                            Err(error) => warn!("Unable to dispatch a {kind} request - {error}"),
                        }
                    }
                }
            }
        }

        drop(outbound_sender);
        outbound.await?;
        Ok(format!(
            "Dispatched {num_dispatched} requests, {} transactions left to request",
            requests.num_total_requests()
        ))
    }

    /// Checks the solidity of the given hashes, returning the number of solid transactions.
    fn check_all(requester: &TransactionRequester, hashes: &[Hash]) -> Result<usize> {
        let mut num_solid = 0;
        for hash in hashes {
            match requester.check_solidity(*hash)? {
                true => num_solid += 1,
                false => debug!("Transaction {} is not solid yet", fmt_id(hash)),
            }
        }
        debug!("{} transactions to request for {}s", requester.num_requests(), requester.kind());
        Ok(num_solid)
    }

    /// Consumes the outbound requests, standing in for the network layer.
    async fn outbound(mut receiver: mpsc::Receiver<(RequestKind, Hash)>) {
        while let Some((kind, hash)) = receiver.recv().await {
            info!("Requesting {kind} transaction {hash} from peers");
        }
    }

    /// Returns a runtime for the node.
    fn runtime() -> Result<Runtime> {
        Ok(runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_stack_size(8 * 1024 * 1024)
            .worker_threads(num_cpus::get().clamp(1, 4))
            .build()?)
    }
}
