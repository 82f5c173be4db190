// ops/src/bindings.rs
#![allow(clippy::all)]
use ethers::prelude::abigen;

abigen!(
    IERC20,
    r#"[
        event Approval(address indexed owner, address indexed spender, uint256 value)
        event Transfer(address indexed from, address indexed to, uint256 value)
        function approve(address spender, uint256 amount) external returns (bool)
        function balanceOf(address account) external view returns (uint256)
        function decimals() external view returns (uint8)
        function symbol() external view returns (string)
        function name() external view returns (string)
        function totalSupply() external view returns (uint256)
        function allowance(address owner, address spender) external view returns (uint256)
        function transfer(address to, uint256 amount) external returns (bool)
    ]"#,
    event_derives(serde::Deserialize, serde::Serialize)
);

// Owner-gated issuance on the project token.
abigen!(
    IMintable,
    r#"[
        function mint(address to, uint256 amount) external
    ]"#
);

// WETH-style wrapper around the chain's native coin (WPOL on Polygon).
abigen!(
    IWrappedNative,
    r#"[
        function deposit() external payable
    ]"#
);

abigen!(
    IOwnable,
    r#"[
        function owner() external view returns (address)
    ]"#
);

// Two-token constant-product pool. Token A is the input side of `swapAForB`.
abigen!(
    ConstantProductPool,
    r#"[
        function getReserves() external view returns (uint256 reserveA, uint256 reserveB)
        function getTokenAddresses() external view returns (address tokenA, address tokenB)
        function addInitialLiquidity(uint256 amountA, uint256 amountB) external
        function swapAForB(uint256 amountAIn) external
    ]"#
);

abigen!(
    ArbitrageStrategy,
    r#"[
        function tokenA() external view returns (address)
        function tokenB() external view returns (address)
        function uniswapPool1() external view returns (address)
        function uniswapPool2() external view returns (address)
        function priceFeed() external view returns (address)
        function profitThreshold() external view returns (uint256)
        function maxSlippage() external view returns (uint256)
        function maxTradeSize() external view returns (uint256)
        function cooldownPeriod() external view returns (uint256)
        function lastExecutionTime() external view returns (uint256)
        function pool1MarketPrice() external view returns (uint256 timestamp, uint256 price, uint256 liquidity)
        function pool2MarketPrice() external view returns (uint256 timestamp, uint256 price, uint256 liquidity)
        function stats() external view returns (uint256 totalTrades, uint256 profitableTrades, uint256 totalProfit, uint256 totalLoss)
        function executeStrategy() external
        event OpportunityFound(uint256 firstPoolPrice, uint256 secondPoolPrice, uint256 profitPercent)
        event TradeFailed(string reason)
        event TradeExecuted(uint256 profit, uint256 timestamp)
        event StrategyParametersUpdated(uint256 profitThreshold, uint256 maxSlippage, uint256 maxTradeSize)
    ]"#,
    event_derives(serde::Deserialize, serde::Serialize)
);

abigen!(
    PythPriceOracle,
    r#"[
        function getHumanReadablePrice() external view returns (int256)
    ]"#
);

// END OF FILE: ops/src/bindings.rs
