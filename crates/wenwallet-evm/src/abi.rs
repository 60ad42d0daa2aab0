//! Contract ABI definitions using alloy's `sol!` macro.
//!
//! Only the functions the wallet adapter calls are declared.

use alloy::sol;

sol! {
    /// ERC-20 token the game charges fees in.
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Rate-limited token faucet.
    #[sol(rpc)]
    interface IFaucet {
        function s_mintInterval() external view returns (uint256);
        function s_mintAmount() external view returns (uint256);
        function paused() external view returns (bool);
        function s_lastMintedTime(address account) external view returns (uint256);
        function mint() external;
    }

    /// A guessed date. Field order matches the deployed contract.
    struct Guess {
        uint256 date;
        uint256 month;
        uint256 year;
    }

    /// The Wen guessing game.
    #[sol(rpc)]
    interface IWenGame {
        function i_startDate() external view returns (uint256);
        function s_endDate() external view returns (uint256);
        function s_gameName() external view returns (string);
        function s_gameEnded() external view returns (bool);
        function s_participationFee() external view returns (uint256);
        function s_guess(address player) external view returns (uint256 date, uint256 month, uint256 year);
        function s_participated(address player) external view returns (bool);
        function s_paid(address player) external view returns (bool);
        function s_correctAns() external view returns (uint256 date, uint256 month, uint256 year);
        function s_individualReward() external view returns (uint256);
        function s_thereIsAWinner() external view returns (bool);
        function play(Guess calldata guess) external;
        function claim() external;
    }

    // Custom errors shared by the game and the faucet.
    error IltmuelcAlreadyPaid();
    error IltmuelcAlreadyParticipated();
    error IltmuelcGameEnded();
    error IltmuelcGameHasNotEnded();
    error IltmuelcInsufficientFunds();
    error IltmuelcMintIntervalNotMet();
    error IltmuelcNonWinnerClaim();
    error IltmuelcNotParticipated();
}
